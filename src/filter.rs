// The boost filter chain.
//
// A pure predicate pipeline over a status resolved on the home server.
// Filters run in a fixed order and stop at the first failing condition, so
// the recorded reason is always the earliest failure. Every check is
// read-only; evaluating the same status twice yields the same decision.

use std::collections::HashSet;
use std::fmt;

use crate::mastodon::types::Status;

/// Authors with this substring in their bio (case-insensitive) have opted
/// out of being boosted by automated accounts.
pub const OPT_OUT_MARKER: &str = "nobot";

/// Why a status was not boosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AuthorIsBot,
    AuthorNotDiscoverable,
    AuthorNotIndexable,
    MissingBio,
    OptOutMarker,
    FilteredSource,
    MissingAltText,
    AlreadyBoosted,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::AuthorIsBot => "author-is-bot",
            SkipReason::AuthorNotDiscoverable => "author-not-discoverable",
            SkipReason::AuthorNotIndexable => "author-not-indexable",
            SkipReason::MissingBio => "missing-bio",
            SkipReason::OptOutMarker => "bio-contains-opt-out-marker",
            SkipReason::FilteredSource => "filtered-source",
            SkipReason::MissingAltText => "image-missing-alt-text",
            SkipReason::AlreadyBoosted => "already-boosted",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of the filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostDecision {
    Boost,
    Skip(SkipReason),
}

/// Run the filter chain on a resolved status.
///
/// Order matters for the reported reason: author flags, bio presence,
/// opt-out marker, source filtering, media descriptions, and finally the
/// live already-boosted flag.
pub fn evaluate(status: &Status, filtered_instances: &HashSet<String>) -> BoostDecision {
    let account = &status.account;

    // 1. Author flags. Null discoverable/indexable counts as not opted in.
    if account.bot {
        return BoostDecision::Skip(SkipReason::AuthorIsBot);
    }
    if account.discoverable != Some(true) {
        return BoostDecision::Skip(SkipReason::AuthorNotDiscoverable);
    }
    if account.indexable != Some(true) {
        return BoostDecision::Skip(SkipReason::AuthorNotIndexable);
    }

    // 2. Bio presence. An empty string is a present (if blank) bio.
    let bio = match &account.note {
        Some(bio) => bio,
        None => return BoostDecision::Skip(SkipReason::MissingBio),
    };

    // 3. Opt-out marker, case-insensitive substring.
    if bio.to_lowercase().contains(OPT_OUT_MARKER) {
        return BoostDecision::Skip(SkipReason::OptOutMarker);
    }

    // 4. Source filtering. Authors local to the home server have no
    //    @server suffix and cannot be source-filtered.
    if let Some((_user, server)) = account.acct.split_once('@') {
        if filtered_instances.contains(server) {
            return BoostDecision::Skip(SkipReason::FilteredSource);
        }
    }

    // 5. Media descriptions. A status with no attachments always passes.
    let undescribed = status
        .media_attachments
        .iter()
        .any(|a| a.description.as_deref().is_none_or(str::is_empty));
    if undescribed {
        return BoostDecision::Skip(SkipReason::MissingAltText);
    }

    // 6. Already boosted — live from the home server, never cached.
    if status.reblogged == Some(true) {
        return BoostDecision::Skip(SkipReason::AlreadyBoosted);
    }

    BoostDecision::Boost
}
