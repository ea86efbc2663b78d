// Mastodon REST client — a thin reqwest wrapper with optional bearer auth.
//
// One client per server. The home-server client carries the bot account's
// access token; source-instance clients are unauthenticated, since the
// trending endpoint is public.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::traits::{HomeServer, TrendSource};
use super::types::{SearchResults, Status};

pub struct MastodonClient {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl MastodonClient {
    /// Create an unauthenticated client for the given instance hostname.
    pub fn new(host: &str) -> Result<Self> {
        Self::build(host, None)
    }

    /// Create an authenticated client for the home server.
    pub fn with_token(host: &str, access_token: &str) -> Result<Self> {
        Self::build(host, Some(access_token.to_string()))
    }

    fn build(host: &str, access_token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fanfare/0.1 (trending-boost relay)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: format!("https://{}", host.trim_end_matches('/')),
            access_token,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Make a GET request to an API endpoint and deserialize the response.
    ///
    /// `params` are query string key-value pairs.
    pub async fn api_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        debug!(path = path, server = self.base_url, "API GET request");

        let response = self
            .request(reqwest::Method::GET, path)
            .query(params)
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))?;

        Self::deserialize_checked(path, response).await
    }

    /// Make a bodyless POST request (action endpoints like reblog).
    pub async fn api_post<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path = path, server = self.base_url, "API POST request");

        let response = self
            .request(reqwest::Method::POST, path)
            .send()
            .await
            .with_context(|| format!("POST {path} failed"))?;

        Self::deserialize_checked(path, response).await
    }

    /// Make a form-encoded PATCH request (credential updates).
    pub async fn api_patch_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<T> {
        debug!(path = path, server = self.base_url, "API PATCH request");

        let response = self
            .request(reqwest::Method::PATCH, path)
            .form(form)
            .send()
            .await
            .with_context(|| format!("PATCH {path} failed"))?;

        Self::deserialize_checked(path, response).await
    }

    async fn deserialize_checked<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{path} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {path} response"))
    }

    /// Update the bot account's profile note, flags, and metadata fields.
    ///
    /// Always sets `bot=true` and `discoverable=true` — an automated
    /// account that expects discoverability from others must declare both.
    pub async fn update_credentials(
        &self,
        note: &str,
        fields: &[(String, String)],
    ) -> Result<()> {
        let mut form: Vec<(String, String)> = vec![
            ("note".to_string(), note.to_string()),
            ("bot".to_string(), "true".to_string()),
            ("discoverable".to_string(), "true".to_string()),
        ];
        for (i, (name, value)) in fields.iter().enumerate() {
            form.push((format!("fields_attributes[{i}][name]"), name.clone()));
            form.push((format!("fields_attributes[{i}][value]"), value.clone()));
        }

        let _account: super::types::Account = self
            .api_patch_form("/api/v1/accounts/update_credentials", &form)
            .await
            .context("Failed to update profile")?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl TrendSource for MastodonClient {
    async fn trending_statuses(&self) -> Result<Vec<Status>> {
        self.api_get("/api/v1/trends/statuses", &[])
            .await
            .with_context(|| format!("Failed to fetch trending statuses from {}", self.base_url))
    }
}

#[async_trait::async_trait]
impl HomeServer for MastodonClient {
    async fn resolve_status(&self, uri: &str) -> Result<Vec<Status>> {
        let results: SearchResults = self
            .api_get(
                "/api/v2/search",
                &[("q", uri), ("type", "statuses"), ("resolve", "true")],
            )
            .await
            .with_context(|| format!("Search for {uri} failed"))?;
        Ok(results.statuses)
    }

    async fn boost(&self, status_id: &str) -> Result<()> {
        let _status: Status = self
            .api_post(&format!("/api/v1/statuses/{status_id}/reblog"))
            .await
            .with_context(|| format!("Failed to boost status {status_id}"))?;
        Ok(())
    }
}
