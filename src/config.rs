use std::collections::HashSet;
use std::env;
use std::str::FromStr;

use anyhow::Result;

/// Trending statuses to consider per source when no limit is configured.
pub const DEFAULT_TRENDING_LIMIT: usize = 20;

/// Minutes between polling passes when FANFARE_POLL_INTERVAL is unset.
pub const DEFAULT_POLL_INTERVAL: u64 = 60;

/// One remote instance to poll for trending statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInstance {
    pub host: String,
    /// Cap on the number of trending statuses to consider per poll.
    pub limit: usize,
}

impl FromStr for SourceInstance {
    type Err = anyhow::Error;

    /// Parse `host` or `host:limit` (e.g. `mastodon.social:10`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            anyhow::bail!("Empty source instance entry");
        }
        match s.split_once(':') {
            Some((host, limit)) => {
                let limit: usize = limit.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid limit '{limit}' for source instance '{host}'")
                })?;
                Ok(Self {
                    host: host.to_string(),
                    limit,
                })
            }
            None => Ok(Self {
                host: s.to_string(),
                limit: DEFAULT_TRENDING_LIMIT,
            }),
        }
    }
}

/// Parse the comma-separated FANFARE_SOURCES list.
pub fn parse_sources(raw: &str) -> Result<Vec<SourceInstance>> {
    raw.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(SourceInstance::from_str)
        .collect()
}

/// Parse the comma-separated FANFARE_FILTERED_INSTANCES set.
pub fn parse_filtered(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse FANFARE_PROFILE_FIELDS: comma-separated `name=value` pairs.
pub fn parse_fields(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Central configuration loaded from environment variables.
///
/// All credentials come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Hostname of the server the bot account lives on.
    pub home_server: String,
    /// Bearer token for the bot account on the home server.
    pub access_token: String,
    /// Instances to poll for trending statuses, in configuration order.
    pub sources: Vec<SourceInstance>,
    /// Hostnames whose authors are never boosted.
    pub filtered_instances: HashSet<String>,
    /// Seconds to pause after each successful boost (rate-limiting courtesy).
    pub boost_delay: Option<u64>,
    /// Minutes between polling passes.
    pub poll_interval: u64,
    /// Intro text for the templated bot profile.
    pub profile_text: String,
    /// Profile metadata fields as name/value pairs.
    pub profile_fields: Vec<(String, String)>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the poll interval and per-source limits have defaults — the
    /// home server, token, and source list are required for anything
    /// beyond `status`.
    pub fn load() -> Result<Self> {
        let sources = match env::var("FANFARE_SOURCES") {
            Ok(raw) => parse_sources(&raw)?,
            Err(_) => Vec::new(),
        };

        let boost_delay = match env::var("FANFARE_BOOST_DELAY") {
            Ok(raw) => Some(raw.parse().map_err(|_| {
                anyhow::anyhow!("FANFARE_BOOST_DELAY must be a number of seconds, got '{raw}'")
            })?),
            Err(_) => None,
        };

        let poll_interval = match env::var("FANFARE_POLL_INTERVAL") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("FANFARE_POLL_INTERVAL must be a number of minutes, got '{raw}'")
            })?,
            Err(_) => DEFAULT_POLL_INTERVAL,
        };
        if poll_interval == 0 {
            anyhow::bail!("FANFARE_POLL_INTERVAL must be at least 1 minute");
        }

        Ok(Self {
            home_server: env::var("FANFARE_HOME_SERVER").unwrap_or_default(),
            access_token: env::var("FANFARE_ACCESS_TOKEN").unwrap_or_default(),
            sources,
            filtered_instances: env::var("FANFARE_FILTERED_INSTANCES")
                .map(|raw| parse_filtered(&raw))
                .unwrap_or_default(),
            boost_delay,
            poll_interval,
            profile_text: env::var("FANFARE_PROFILE").unwrap_or_default(),
            profile_fields: env::var("FANFARE_PROFILE_FIELDS")
                .map(|raw| parse_fields(&raw))
                .unwrap_or_default(),
        })
    }

    /// Check that the home server and its access token are configured.
    /// Call this before any operation that talks to the home server.
    pub fn require_home(&self) -> Result<()> {
        if self.home_server.is_empty() {
            anyhow::bail!(
                "FANFARE_HOME_SERVER not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        if self.access_token.is_empty() {
            anyhow::bail!(
                "FANFARE_ACCESS_TOKEN not set. Create an access token for the bot\n\
                 account (Settings → Development on your home server) and add it\n\
                 to your .env file."
            );
        }
        Ok(())
    }

    /// Check that at least one source instance is configured.
    /// Call this before a boost pass.
    pub fn require_sources(&self) -> Result<()> {
        if self.sources.is_empty() {
            anyhow::bail!(
                "FANFARE_SOURCES not set. Add a comma-separated instance list\n\
                 (e.g. FANFARE_SOURCES=mastodon.social:10,fosstodon.org) to your .env file."
            );
        }
        Ok(())
    }
}
