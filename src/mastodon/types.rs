// Serde types for the consumed subset of the Mastodon REST API.
//
// Only the fields the boost pipeline reads are modeled — the API returns
// far more. The nullable account flags stay Option<bool>: the API reports
// null for accounts that never set them, and the filter chain treats null
// the same as false.

use serde::Deserialize;

/// A status as returned by the trending and search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    /// Server-local snowflake id — only valid on the server that answered.
    pub id: String,
    /// Canonical, instance-independent identifier.
    pub uri: String,
    /// Human-facing permalink.
    #[serde(default)]
    pub url: Option<String>,
    /// Whether the authenticated account already boosted this status.
    /// Absent on unauthenticated reads.
    #[serde(default)]
    pub reblogged: Option<bool>,
    pub account: Account,
    #[serde(default)]
    pub media_attachments: Vec<MediaAttachment>,
}

/// The author of a status, as seen by the server answering the request.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// `user` for accounts local to the answering server, `user@server`
    /// for remote ones.
    pub acct: String,
    /// Profile bio (HTML). Null when the account never set one.
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub bot: bool,
    /// Null when the account never opted in.
    #[serde(default)]
    pub discoverable: Option<bool>,
    /// Null on servers that predate the setting.
    #[serde(default)]
    pub indexable: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaAttachment {
    /// Alt text. Null or empty means the media is undescribed.
    #[serde(default)]
    pub description: Option<String>,
}

/// Response shape of `GET /api/v2/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub statuses: Vec<Status>,
}
