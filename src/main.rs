//! careermap main entry point
//!
//! Command-line interface around the crawl pipeline: resolves configuration,
//! starts the status server, and runs the requested stage(s) to completion.

use careermap::config::{default_config, load_config_with_hash, Config};
use careermap::crawler::{Coordinator, HttpFetcher, Stage};
use careermap::status::StatusHandle;
use careermap::storage::{ClubsStore, PlayersStore};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// careermap: season-indexed club-affiliation harvester
///
/// Crawls league seasons, discovers clubs and players, and reduces each
/// player's transfer ledger to a per-season record of professional club
/// affiliations. Progress is checkpointed after every unit of work, so an
/// interrupted run resumes at the first incomplete key.
#[derive(Parser, Debug)]
#[command(name = "careermap")]
#[command(version = "0.1.0")]
#[command(about = "Season-indexed club-affiliation harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Discard previous checkpoints and start over
    #[arg(long)]
    fresh: bool,

    /// Which crawl stage(s) to run
    #[arg(long, value_enum, default_value = "all")]
    stage: Stage,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show checkpoint and output statistics and exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No config file given, using built-in defaults");
            default_config()?
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config, cli.stage, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("careermap=info,warn"),
            1 => EnvFilter::new("careermap=debug,info"),
            2 => EnvFilter::new("careermap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== careermap Dry Run ===\n");

    println!("Crawl:");
    println!(
        "  Seasons: {}..={}",
        config.crawl.start_year, config.crawl.end_year
    );
    println!("  Retry attempts: {}", config.crawl.retry_attempts);
    println!(
        "  Page delay: {}-{}ms",
        config.crawl.page_delay_min_ms, config.crawl.page_delay_max_ms
    );
    println!(
        "  Batch cooldown: {}ms every {} units",
        config.crawl.batch_cooldown_ms, config.crawl.batch_size
    );

    println!("\nSite: {}", config.site.base_url);
    if let Some(proxy) = &config.proxy {
        println!("Proxy: {}", proxy.url);
    }

    println!("\nOutput:");
    println!("  Clubs: {}", config.output.clubs_path.display());
    println!("  Players: {}", config.output.players_path.display());
    println!("  Errors: {}", config.output.error_log_path.display());
    println!("\nStatus server port: {}", config.server.port);

    println!("\nLeagues ({}):", config.leagues.len());
    for league in &config.leagues {
        println!("  - {} ({})", league.code, league.slug);
    }

    let seasons = (config.crawl.end_year - config.crawl.start_year + 1) as usize;
    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would enumerate {} league-season keys",
        seasons * config.leagues.len()
    );
}

/// Handles the --stats mode: shows checkpoint and output statistics
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let clubs = ClubsStore::open(&config.output.clubs_path)?;
    let players = PlayersStore::open(&config.output.players_path)?;

    println!("=== careermap Statistics ===\n");
    println!("Clubs document: {}", config.output.clubs_path.display());
    println!("  League seasons complete: {}", clubs.len());
    println!("  Distinct club URLs: {}", clubs.club_urls().len());
    println!(
        "\nPlayers document: {}",
        config.output.players_path.display()
    );
    println!("  Player URLs complete: {}", players.completed_count());
    println!("  Player records: {}", players.player_count());

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    stage: Stage,
    fresh: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if fresh {
        tracing::info!("Starting fresh crawl (ignoring previous checkpoints)");
    } else {
        tracing::info!("Starting crawl (will resume where a previous run stopped)");
    }

    let status = StatusHandle::new();

    // Read-only companion; the crawl owns all writes.
    let server_status = status.clone();
    let server_config = config.clone();
    tokio::spawn(async move {
        if let Err(err) = careermap::status::serve(server_status, server_config).await {
            tracing::error!("Status server failed: {}", err);
        }
    });

    let fetcher = HttpFetcher::new(&config)?;
    let mut coordinator = Coordinator::new(config, fetcher, status, fresh)?;

    match coordinator.run(stage).await {
        Ok(()) => {
            tracing::info!("Crawl completed: key space exhausted");
            Ok(())
        }
        Err(err) => {
            tracing::error!("Crawl failed: {}", err);
            Err(err.into())
        }
    }
}
