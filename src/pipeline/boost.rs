// The boost pipeline: one polling pass over the configured sources.
//
// Each source instance is a bulkhead: an error while fetching or processing
// its trending list is captured in the run report without touching the
// other instances. Within an instance, items are processed strictly in the
// order the source reported them, one at a time.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::SourceInstance;
use crate::filter::{self, BoostDecision, SkipReason};
use crate::mastodon::traits::{HomeServer, TrendSource};

/// What happened to a single trending item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Boosted,
    Skipped(SkipReason),
    /// The home server's search returned no match for the item's URI.
    ResolutionFailed,
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemOutcome::Boosted => f.write_str("boosted"),
            ItemOutcome::Skipped(reason) => write!(f, "skipped:{reason}"),
            ItemOutcome::ResolutionFailed => f.write_str("resolution-failed"),
        }
    }
}

/// Per-item outcomes for one source instance in one pass.
#[derive(Debug)]
pub struct InstanceReport {
    pub host: String,
    pub outcomes: Vec<ItemOutcome>,
}

impl InstanceReport {
    pub fn boosted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ItemOutcome::Boosted))
            .count()
    }
}

/// One source instance's slot in the run report: either its per-item
/// outcomes or the error that aborted it.
#[derive(Debug)]
pub struct InstanceRun {
    pub host: String,
    pub result: Result<InstanceReport>,
}

/// One complete pass across all configured sources.
#[derive(Debug)]
pub struct RunReport {
    pub instances: Vec<InstanceRun>,
}

impl RunReport {
    pub fn boosted(&self) -> usize {
        self.reports().map(InstanceReport::boosted).sum()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes()
            .filter(|o| matches!(o, ItemOutcome::Skipped(_)))
            .count()
    }

    pub fn resolution_failures(&self) -> usize {
        self.outcomes()
            .filter(|o| matches!(o, ItemOutcome::ResolutionFailed))
            .count()
    }

    pub fn failed_instances(&self) -> usize {
        self.instances.iter().filter(|i| i.result.is_err()).count()
    }

    fn reports(&self) -> impl Iterator<Item = &InstanceReport> {
        self.instances.iter().filter_map(|i| i.result.as_ref().ok())
    }

    fn outcomes(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.reports().flat_map(|r| r.outcomes.iter())
    }
}

/// Process one source instance's trending list end-to-end.
///
/// Fetches the trending statuses, truncates to the configured limit, and
/// for each item in order: resolves it on the home server, runs the filter
/// chain, and boosts when the decision allows. A configured `boost_delay`
/// pauses after each successful boost. Any error from the source or home
/// server aborts this instance only — the caller records it and moves on.
pub async fn process_instance(
    source: &SourceInstance,
    remote: &dyn TrendSource,
    home: &dyn HomeServer,
    filtered_instances: &HashSet<String>,
    boost_delay: Option<u64>,
) -> Result<InstanceReport> {
    let mut trending = remote
        .trending_statuses()
        .await
        .with_context(|| format!("Failed to fetch trending statuses from {}", source.host))?;
    trending.truncate(source.limit);

    let total = trending.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, item) in trending.iter().enumerate() {
        let position = index + 1;

        let matches = home
            .resolve_status(&item.uri)
            .await
            .with_context(|| format!("Failed to resolve {} on the home server", item.uri))?;

        // Zero matches is a per-item miss, not an instance failure.
        let Some(status) = matches.first() else {
            warn!(
                instance = %source.host,
                uri = %item.uri,
                "{position}/{total} resolution-failed"
            );
            outcomes.push(ItemOutcome::ResolutionFailed);
            continue;
        };

        let outcome = match filter::evaluate(status, filtered_instances) {
            BoostDecision::Boost => {
                home.boost(&status.id)
                    .await
                    .with_context(|| format!("Failed to boost {}", status.uri))?;

                if let Some(seconds) = boost_delay {
                    info!(
                        seconds,
                        url = status.url.as_deref().unwrap_or(&status.uri),
                        "Pausing after boost"
                    );
                    tokio::time::sleep(Duration::from_secs(seconds)).await;
                }

                ItemOutcome::Boosted
            }
            BoostDecision::Skip(reason) => ItemOutcome::Skipped(reason),
        };

        info!(
            instance = %source.host,
            author = %status.account.acct,
            "{position}/{total} {outcome}"
        );
        outcomes.push(outcome);
    }

    Ok(InstanceReport {
        host: source.host.clone(),
        outcomes,
    })
}

/// Drive one complete polling pass across all configured sources.
///
/// Sources are processed sequentially in configuration order. A failure in
/// one instance is logged and recorded in the report; it never prevents
/// the later instances from being processed, and the pass itself cannot
/// fail.
pub async fn run_boost_pass(
    sources: &[(SourceInstance, Box<dyn TrendSource>)],
    home: &dyn HomeServer,
    filtered_instances: &HashSet<String>,
    boost_delay: Option<u64>,
) -> RunReport {
    let mut instances = Vec::with_capacity(sources.len());

    for (source, remote) in sources {
        let result =
            process_instance(source, remote.as_ref(), home, filtered_instances, boost_delay).await;

        if let Err(ref e) = result {
            error!(instance = %source.host, error = %e, "Instance processing failed, moving on");
        }

        instances.push(InstanceRun {
            host: source.host.clone(),
            result,
        });
    }

    RunReport { instances }
}
