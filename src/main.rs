//! Sitemap-Indexer main entry point
//!
//! This is the command-line interface for keeping a site's URL table in
//! step with the search index.

use anyhow::Context;
use clap::Parser;
use sitemap_indexer::config::{load_config_with_hash, Config};
use sitemap_indexer::output::{print_statistics, TableStatistics};
use sitemap_indexer::storage::{open_table_store, RunHistory, TableStore};
use sitemap_indexer::url::{build_sorting_rules, parse_priority_list};
use sitemap_indexer::{run, RunOptions};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Number of past runs shown by --stats
const RECENT_RUNS: usize = 10;

/// Sitemap-Indexer: sitemap-driven indexing requests
///
/// Crawls the site's sitemaps, keeps the URL table up to date, requests
/// indexing for new URLs and re-checks which URLs made it into the index.
#[derive(Parser, Debug)]
#[command(name = "sitemap-indexer")]
#[command(version)]
#[command(about = "Sitemap-driven indexing requests", long_about = None)]
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

    /// Also write the log to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Comma-separated URLs or site paths to submit first
    #[arg(long, value_name = "URLS", conflicts_with = "interactive")]
    prioritize: Option<String>,

    /// Ask for priority URLs on stdin before the run
    #[arg(long)]
    interactive: bool,

    /// Do not send indexing requests
    #[arg(long)]
    skip_submit: bool,

    /// Do not check index status
    #[arg(long)]
    skip_verify: bool,

    /// Validate config and show what a run would do without running it
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics of the URL table and past runs and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            return Err(e.into());
        }
    };

    let outcome = if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_run(&cli, &config, config_hash).await
    };

    if let Err(e) = outcome {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = || {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("sitemap_indexer=info,warn"),
                1 => EnvFilter::new("sitemap_indexer=debug,info"),
                2 => EnvFilter::new("sitemap_indexer=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    };

    match log_file {
        Some(path) => {
            use tracing_subscriber::layer::SubscriberExt;
            use tracing_subscriber::util::SubscriberInitExt;

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(filter())
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_target(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .init();
        }
    }

    Ok(())
}

/// Handles the --dry-run mode: validates config and shows what a run would do
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Sitemap-Indexer Dry Run ===\n");

    println!("Site:");
    println!("  URL: {}", config.site.url);
    println!("  Root sitemap: {}", config.root_sitemap_url());

    println!("\nFiles:");
    println!("  URL table: {}", config.files.table_file().display());
    println!("  Sitemap archive: {}", config.files.sitemap_dir().display());
    println!("  Results log: {}", config.files.results_log.display());
    println!("  Run history: {}", config.files.history_db().display());

    println!("\nLimits:");
    println!(
        "  Max submissions per run: {}",
        config.limits.max_submission_urls_per_run
    );
    println!(
        "  Max index checks per run: {}",
        config.limits.max_indexing_urls_per_run
    );
    println!("  Re-check cooldown: {} days", config.limits.recheck_cooldown_days);

    let rules = build_sorting_rules(config);
    println!("\nSorting Rules ({}):", rules.len());
    for rule in &rules {
        println!("  - {}", rule.name());
    }
    println!(
        "  Alphabetical: {}, new URLs first: {}",
        config.sorting.alphabetical, config.sorting.new_urls_first
    );

    println!("\nExcluded URLs ({}):", config.exclude.len());
    for url in &config.exclude {
        println!("  - {}", url);
    }

    let store = open_table_store(config);
    let table = store
        .load()
        .with_context(|| format!("cannot read URL table {}", store.path().display()))?;

    println!("\n✓ Configuration is valid");
    println!("✓ URL table has {} rows", table.len());

    Ok(())
}

/// Handles the --stats mode: shows URL table totals and recent runs
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let store = open_table_store(config);
    println!("URL table: {}", store.path().display());
    println!("Run history: {}\n", config.files.history_db().display());

    let table = store
        .load()
        .with_context(|| format!("cannot read URL table {}", store.path().display()))?;
    let history = RunHistory::open(&config.files.history_db())
        .context("cannot open run history")?;
    let runs = history.recent_runs(RECENT_RUNS)?;

    print_statistics(&TableStatistics::from_table(&table), &runs);

    Ok(())
}

/// Handles the main run
async fn handle_run(cli: &Cli, config: &Config, config_hash: String) -> anyhow::Result<()> {
    let raw_priorities = if cli.interactive {
        Some(prompt_priorities()?)
    } else {
        cli.prioritize.clone()
    };

    let prioritized = raw_priorities
        .map(|raw| parse_priority_list(&raw, &config.site.url))
        .unwrap_or_default();
    if !prioritized.is_empty() {
        tracing::info!("Prioritized URLs: {}", prioritized.len());
    }

    let options = RunOptions {
        prioritized,
        skip_submit: cli.skip_submit,
        skip_verify: cli.skip_verify,
        config_hash,
    };

    let result = run(config, &options).await.context("run failed")?;
    tracing::info!(
        "Done: {} added, {} submitted, {} indexed, {} not indexed",
        result.urls_added,
        result.newly_submitted,
        result.newly_indexed,
        result.newly_not_indexed
    );

    Ok(())
}

/// Reads a comma-separated priority list from stdin
fn prompt_priorities() -> anyhow::Result<String> {
    print!("Enter URLs to prioritize, separated by commas (empty for none): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("cannot read priority list from stdin")?;

    Ok(line)
}
