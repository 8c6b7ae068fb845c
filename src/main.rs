//! Linkharvest main entry point
//!
//! Command-line interface for the scheduled link harvester.

use clap::Parser;
use linkharvest::config::load_config_with_hash;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linkharvest: a scheduled, depth-bounded file harvester
///
/// Crawls configured seed pages on a fixed interval, following links that
/// match each seed's crawl pattern and downloading files whose links match
/// its file pattern. Files downloaded in earlier runs are remembered and
/// never fetched again.
#[derive(Parser, Debug)]
#[command(name = "linkharvest")]
#[command(version)]
#[command(about = "A scheduled, depth-bounded file harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run a single pass and exit, ignoring interval and run-count
    #[arg(long, conflicts_with = "dry_run")]
    once: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // try_parse so a missing argument exits 1, not clap's default 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(err) => {
            tracing::error!("Failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        return Ok(());
    }

    if cli.once {
        linkharvest::scheduler::run_once(config).await?;
    } else {
        linkharvest::scheduler::run(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkharvest=info,warn"),
            1 => EnvFilter::new("linkharvest=debug,info"),
            2 => EnvFilter::new("linkharvest=trace,debug"),
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
fn handle_dry_run(config: &linkharvest::Config, config_hash: &str) {
    println!("=== Linkharvest Dry Run ===\n");

    println!("Config hash: {}", config_hash);

    println!("\nHarvester:");
    println!(
        "  Download location: {}",
        config.harvester.download_location.display()
    );
    println!("  History file: {}", config.harvester.db_path.display());
    println!("  Interval: {}s", config.harvester.interval);
    if config.harvester.run_count == 0 {
        println!("  Run count: unbounded");
    } else {
        println!("  Run count: {}", config.harvester.run_count);
    }
    println!("  Request delay: {}ms", config.harvester.request_delay);
    println!("  Page size ceiling: {} bytes", config.harvester.max_page_bytes);
    println!("  File size ceiling: {} bytes", config.harvester.max_file_bytes);

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {} (depth {})", seed.url, seed.depth);
        match &seed.crawl_pattern {
            Some(pattern) => println!("    crawl pattern: {}", pattern),
            None => println!("    crawl pattern: (all links)"),
        }
        println!("    file pattern:  {}", seed.file_pattern);
    }

    println!("\n✓ Configuration is valid");
}
