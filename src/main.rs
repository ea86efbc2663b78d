use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use fanfare::config::{Config, SourceInstance};
use fanfare::mastodon::client::MastodonClient;
use fanfare::mastodon::traits::TrendSource;
use fanfare::pipeline::boost::RunReport;

/// Fanfare: trending-boost relay for Mastodon.
///
/// Polls the trending feeds of subscribed instances and boosts qualifying
/// posts on the home server, with safety filters for author consent,
/// discoverability, and media accessibility.
#[derive(Parser)]
#[command(name = "fanfare", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the polling loop: boost now, then on every interval
    Run,

    /// Run a single boost pass and exit
    Boost,

    /// Push the templated bot profile to the home server
    UpdateProfile,

    /// Show the resolved configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fanfare=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let config = Config::load()?;
            config.require_home()?;
            config.require_sources()?;

            let (sources, home) = build_clients(&config)?;
            info!(
                home = %config.home_server,
                sources = sources.len(),
                interval_minutes = config.poll_interval,
                "Config loaded"
            );

            fanfare::scheduler::run_forever(
                &sources,
                &home,
                &config.filtered_instances,
                config.boost_delay,
                config.poll_interval,
            )
            .await;
        }

        Commands::Boost => {
            let config = Config::load()?;
            config.require_home()?;
            config.require_sources()?;

            let (sources, home) = build_clients(&config)?;

            println!("Running one boost pass...");
            let report = fanfare::pipeline::boost::run_boost_pass(
                &sources,
                &home,
                &config.filtered_instances,
                config.boost_delay,
            )
            .await;

            print_report(&report);
        }

        Commands::UpdateProfile => {
            let config = Config::load()?;
            config.require_home()?;
            config.require_sources()?;

            let home = MastodonClient::with_token(&config.home_server, &config.access_token)?;
            fanfare::profile::update(&home, &config).await?;

            println!("{}", "Profile updated.".bold());
        }

        Commands::Status => {
            let config = Config::load()?;

            let home = if config.home_server.is_empty() {
                "not set".to_string()
            } else {
                config.home_server.clone()
            };
            let token = if config.access_token.is_empty() {
                "not set".red().to_string()
            } else {
                "set".green().to_string()
            };

            println!("Home server:  {home} (token {token})");

            if config.sources.is_empty() {
                println!("Sources:      none configured");
                println!("  Set FANFARE_SOURCES to subscribe to instances");
            } else {
                println!("Sources:");
                for source in &config.sources {
                    println!("  - {} (top {})", source.host, source.limit);
                }
            }

            if config.filtered_instances.is_empty() {
                println!("Filtered:     none");
            } else {
                let mut filtered: Vec<_> =
                    config.filtered_instances.iter().cloned().collect();
                filtered.sort();
                println!("Filtered:     {}", filtered.join(", "));
            }

            match config.boost_delay {
                Some(seconds) => println!("Boost delay:  {seconds}s"),
                None => println!("Boost delay:  none"),
            }
            println!("Interval:     every {} minutes", config.poll_interval);
        }
    }

    Ok(())
}

/// Construct the home-server client and one client per source instance.
///
/// Construction only validates configuration (URLs, token presence) — a
/// bad credential or unreachable server surfaces on the first request.
fn build_clients(
    config: &Config,
) -> Result<(Vec<(SourceInstance, Box<dyn TrendSource>)>, MastodonClient)> {
    let home = MastodonClient::with_token(&config.home_server, &config.access_token)?;

    let mut sources: Vec<(SourceInstance, Box<dyn TrendSource>)> =
        Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        let client = MastodonClient::new(&source.host)?;
        sources.push((source.clone(), Box::new(client)));
    }

    Ok((sources, home))
}

fn print_report(report: &RunReport) {
    println!("\n{}", "Boost pass complete.".bold());

    for instance in &report.instances {
        match &instance.result {
            Ok(items) => println!(
                "  {}: {} items, {} boosted",
                instance.host,
                items.outcomes.len(),
                items.boosted()
            ),
            Err(e) => println!("  {}: {}", instance.host, format!("failed: {e}").red()),
        }
    }

    println!("  Boosted:    {}", report.boosted());
    println!("  Skipped:    {}", report.skipped());
    println!("  Unresolved: {}", report.resolution_failures());
}
