// Bot profile templating and update.
//
// The account note is assembled from the configured intro text, the list
// of subscribed instances, and a fixed safety section describing the
// filters the bot enforces. Pushed via update_credentials together with
// the bot and discoverable flags.

use anyhow::Result;
use tracing::info;

use crate::config::{Config, SourceInstance};
use crate::mastodon::client::MastodonClient;

const SAFETY_SECTION: &str = "[Safety]\n\
    - I don't boost posts from users who have `nobot` in their bio\n\
    - I don't boost posts from users who are undiscoverable/unindexable\n\
    - I don't boost posts with undescribed media";

/// Assemble the profile note: intro, subscribed-instance list, safety
/// section.
pub fn build_note(intro: &str, sources: &[SourceInstance]) -> String {
    let instance_list = sources
        .iter()
        .map(|s| format!("- {}", s.host))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\n[Instance list]\n{}\n\n{}",
        intro.trim(),
        instance_list,
        SAFETY_SECTION
    )
}

/// Push the templated profile to the home server.
pub async fn update(client: &MastodonClient, config: &Config) -> Result<()> {
    let note = build_note(&config.profile_text, &config.sources);
    info!(server = %config.home_server, "Updating bot profile");
    client
        .update_credentials(&note, &config.profile_fields)
        .await
}
