// Unit tests for the boost filter chain.
//
// Exercises every filter in isolation, the fixed evaluation order (the
// recorded reason is always the earliest failing filter), and idempotence.

use std::collections::HashSet;

use fanfare::filter::{evaluate, BoostDecision, SkipReason};
use fanfare::mastodon::types::{Account, MediaAttachment, Status};

/// A status that passes every filter.
fn boostable() -> Status {
    Status {
        id: "101".to_string(),
        uri: "https://origin.example/users/author/statuses/1".to_string(),
        url: Some("https://home.example/@author@origin.example/101".to_string()),
        reblogged: Some(false),
        account: Account {
            acct: "author@origin.example".to_string(),
            note: Some("<p>I post about synthesizers.</p>".to_string()),
            bot: false,
            discoverable: Some(true),
            indexable: Some(true),
        },
        media_attachments: vec![],
    }
}

fn attachment(description: Option<&str>) -> MediaAttachment {
    MediaAttachment {
        description: description.map(String::from),
    }
}

fn no_filters() -> HashSet<String> {
    HashSet::new()
}

fn filtering(hosts: &[&str]) -> HashSet<String> {
    hosts.iter().map(|h| h.to_string()).collect()
}

// ============================================================
// Happy path
// ============================================================

#[test]
fn passing_status_boosts() {
    assert_eq!(evaluate(&boostable(), &no_filters()), BoostDecision::Boost);
}

#[test]
fn evaluation_is_idempotent() {
    let status = boostable();
    let first = evaluate(&status, &no_filters());
    let second = evaluate(&status, &no_filters());
    assert_eq!(first, second);

    let mut skipped = boostable();
    skipped.reblogged = Some(true);
    assert_eq!(
        evaluate(&skipped, &no_filters()),
        evaluate(&skipped, &no_filters())
    );
}

// ============================================================
// Filter 1: author flags
// ============================================================

#[test]
fn bot_author_skips() {
    let mut status = boostable();
    status.account.bot = true;
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::AuthorIsBot)
    );
}

#[test]
fn undiscoverable_author_skips() {
    let mut status = boostable();
    status.account.discoverable = Some(false);
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::AuthorNotDiscoverable)
    );
}

#[test]
fn null_discoverable_counts_as_undiscoverable() {
    let mut status = boostable();
    status.account.discoverable = None;
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::AuthorNotDiscoverable)
    );
}

#[test]
fn unindexable_author_skips() {
    let mut status = boostable();
    status.account.indexable = Some(false);
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::AuthorNotIndexable)
    );
}

#[test]
fn null_indexable_counts_as_unindexable() {
    let mut status = boostable();
    status.account.indexable = None;
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::AuthorNotIndexable)
    );
}

// ============================================================
// Filters 2–3: bio presence and opt-out marker
// ============================================================

#[test]
fn missing_bio_skips() {
    let mut status = boostable();
    status.account.note = None;
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::MissingBio)
    );
}

#[test]
fn empty_bio_is_a_present_bio_and_passes() {
    // "" is distinguished from null: it passes the presence check and
    // cannot contain the opt-out marker.
    let mut status = boostable();
    status.account.note = Some(String::new());
    assert_eq!(evaluate(&status, &no_filters()), BoostDecision::Boost);
}

#[test]
fn opt_out_marker_skips() {
    let mut status = boostable();
    status.account.note = Some("<p>no boosts please, nobot</p>".to_string());
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::OptOutMarker)
    );
}

#[test]
fn opt_out_marker_is_case_insensitive() {
    let mut status = boostable();
    status.account.note = Some("<p>#NoBot</p>".to_string());
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::OptOutMarker)
    );
}

#[test]
fn opt_out_marker_matches_as_substring() {
    let mut status = boostable();
    status.account.note = Some("nobots welcome here".to_string());
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::OptOutMarker)
    );
}

// ============================================================
// Filter 4: source filtering
// ============================================================

#[test]
fn filtered_source_skips_even_when_everything_else_passes() {
    let status = boostable();
    assert_eq!(
        evaluate(&status, &filtering(&["origin.example"])),
        BoostDecision::Skip(SkipReason::FilteredSource)
    );
}

#[test]
fn unfiltered_source_passes() {
    let status = boostable();
    assert_eq!(
        evaluate(&status, &filtering(&["elsewhere.example"])),
        BoostDecision::Boost
    );
}

#[test]
fn local_author_is_never_source_filtered() {
    // Authors local to the home server have no @server suffix.
    let mut status = boostable();
    status.account.acct = "localauthor".to_string();
    assert_eq!(
        evaluate(&status, &filtering(&["origin.example"])),
        BoostDecision::Boost
    );
}

// ============================================================
// Filter 5: media descriptions
// ============================================================

#[test]
fn no_attachments_always_passes_the_media_filter() {
    let mut status = boostable();
    status.media_attachments = vec![];
    assert_eq!(evaluate(&status, &no_filters()), BoostDecision::Boost);
}

#[test]
fn null_description_skips() {
    let mut status = boostable();
    status.media_attachments = vec![attachment(None)];
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::MissingAltText)
    );
}

#[test]
fn empty_description_skips() {
    let mut status = boostable();
    status.media_attachments = vec![attachment(Some(""))];
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::MissingAltText)
    );
}

#[test]
fn fully_described_media_passes() {
    let mut status = boostable();
    status.media_attachments = vec![
        attachment(Some("A modular synth patch")),
        attachment(Some("Close-up of the patch cables")),
    ];
    assert_eq!(evaluate(&status, &no_filters()), BoostDecision::Boost);
}

#[test]
fn one_undescribed_attachment_among_described_skips() {
    let mut status = boostable();
    status.media_attachments = vec![
        attachment(Some("A modular synth patch")),
        attachment(None),
    ];
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::MissingAltText)
    );
}

// ============================================================
// Filter 6: already boosted
// ============================================================

#[test]
fn already_boosted_skips() {
    let mut status = boostable();
    status.reblogged = Some(true);
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::AlreadyBoosted)
    );
}

#[test]
fn null_reblogged_counts_as_not_boosted() {
    let mut status = boostable();
    status.reblogged = None;
    assert_eq!(evaluate(&status, &no_filters()), BoostDecision::Boost);
}

// ============================================================
// Ordering: the reason is the earliest failing filter
// ============================================================

#[test]
fn bot_reason_wins_over_already_boosted() {
    let mut status = boostable();
    status.account.bot = true;
    status.reblogged = Some(true);
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::AuthorIsBot)
    );
}

#[test]
fn missing_bio_reason_wins_over_filtered_source() {
    let mut status = boostable();
    status.account.note = None;
    assert_eq!(
        evaluate(&status, &filtering(&["origin.example"])),
        BoostDecision::Skip(SkipReason::MissingBio)
    );
}

#[test]
fn filtered_source_reason_wins_over_undescribed_media() {
    let mut status = boostable();
    status.media_attachments = vec![attachment(None)];
    assert_eq!(
        evaluate(&status, &filtering(&["origin.example"])),
        BoostDecision::Skip(SkipReason::FilteredSource)
    );
}

#[test]
fn undescribed_media_reason_wins_over_already_boosted() {
    let mut status = boostable();
    status.media_attachments = vec![attachment(None)];
    status.reblogged = Some(true);
    assert_eq!(
        evaluate(&status, &no_filters()),
        BoostDecision::Skip(SkipReason::MissingAltText)
    );
}

#[test]
fn already_boosted_status_never_boosts_regardless_of_other_fields() {
    // Whatever else is set, reblogged=true can never produce Boost.
    let mut status = boostable();
    status.reblogged = Some(true);
    for filters in [no_filters(), filtering(&["origin.example"])] {
        assert!(matches!(
            evaluate(&status, &filters),
            BoostDecision::Skip(_)
        ));
    }
}

// ============================================================
// Reason strings (the observability surface)
// ============================================================

#[test]
fn reason_strings_are_stable() {
    let cases = [
        (SkipReason::AuthorIsBot, "author-is-bot"),
        (SkipReason::AuthorNotDiscoverable, "author-not-discoverable"),
        (SkipReason::AuthorNotIndexable, "author-not-indexable"),
        (SkipReason::MissingBio, "missing-bio"),
        (SkipReason::OptOutMarker, "bio-contains-opt-out-marker"),
        (SkipReason::FilteredSource, "filtered-source"),
        (SkipReason::MissingAltText, "image-missing-alt-text"),
        (SkipReason::AlreadyBoosted, "already-boosted"),
    ];
    for (reason, expected) in cases {
        assert_eq!(reason.as_str(), expected);
        assert_eq!(reason.to_string(), expected);
    }
}
