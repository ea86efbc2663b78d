// Collaborator seams for the boost pipeline.
//
// The pipeline needs exactly two capabilities: listing what a remote
// instance considers trending, and acting on the home server (resolve a
// URI, boost a status). MastodonClient implements both; tests substitute
// in-memory mocks.

use anyhow::Result;
use async_trait::async_trait;

use super::types::Status;

/// A remote instance that can report its trending statuses.
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Fetch the instance's current trending statuses, most popular first.
    async fn trending_statuses(&self) -> Result<Vec<Status>>;
}

/// The home server: resolves remote statuses and boosts them.
#[async_trait]
pub trait HomeServer: Send + Sync {
    /// Cross-resolve a remote status URI into the home server's own view.
    /// Returns every match the search produced; callers use the first.
    async fn resolve_status(&self, uri: &str) -> Result<Vec<Status>>;

    /// Boost (reblog) a status by its home-server id.
    async fn boost(&self, status_id: &str) -> Result<()>;
}
