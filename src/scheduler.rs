// Fixed-interval polling loop.
//
// One boost pass runs immediately, then one per interval tick, forever.
// Passes can never overlap: the loop is a single task that awaits each
// pass to completion before waiting for the next tick, and a pass that
// overruns the interval delays the next tick instead of bursting to
// catch up.

use std::collections::HashSet;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::info;

use crate::config::SourceInstance;
use crate::mastodon::traits::{HomeServer, TrendSource};
use crate::pipeline::boost::{self, RunReport};

/// Run boost passes forever at the configured interval (in minutes).
///
/// The first tick of a tokio interval completes immediately, which gives
/// the run-now-then-repeat behavior without a special case.
pub async fn run_forever(
    sources: &[(SourceInstance, Box<dyn TrendSource>)],
    home: &dyn HomeServer,
    filtered_instances: &HashSet<String>,
    boost_delay: Option<u64>,
    poll_interval_minutes: u64,
) {
    let mut ticker = time::interval(Duration::from_secs(poll_interval_minutes * 60));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        info!(sources = sources.len(), "Starting boost pass");
        let report = boost::run_boost_pass(sources, home, filtered_instances, boost_delay).await;
        log_pass_summary(&report);

        let next = chrono::Local::now() + chrono::Duration::minutes(poll_interval_minutes as i64);
        info!(
            minutes = poll_interval_minutes,
            "Next pass around {}",
            next.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

fn log_pass_summary(report: &RunReport) {
    info!(
        boosted = report.boosted(),
        skipped = report.skipped(),
        unresolved = report.resolution_failures(),
        failed_instances = report.failed_instances(),
        "Boost pass complete"
    );
}
