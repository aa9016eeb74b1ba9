//! Burrow main entry point
//!
//! This is the command-line interface for the Burrow directory enumerator.

use anyhow::Context;
use burrow::config::{load_config_with_hash, Config};
use burrow::discovery::{EnumerationSummary, Enumerator, Lister, ListingSummary};
use burrow::output::ConsoleSink;
use burrow::parse_target;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Burrow: recursive hidden-directory discovery
///
/// Burrow explores a web server's directory tree from a base URL, following
/// explicit directory links and probing a wordlist of common hidden names.
/// Every probe is scored against a "not found" baseline before descending.
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(version)]
#[command(about = "Recursive hidden-directory discovery", long_about = None)]
struct Cli {
    /// Target URL, either "https://host/path" or "https host/path"
    #[arg(value_name = "TARGET", required = true, num_args = 1..)]
    target: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override enumeration.max-depth
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Override enumeration.max-concurrent-requests
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// List explicitly linked entries recursively instead of probing
    #[arg(long)]
    list: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;
    let target = parse_target(&cli.target.join(" "))
        .with_context(|| format!("Invalid target: {}", cli.target.join(" ")))?;

    if cli.dry_run {
        print_dry_run(&config, &target);
        return Ok(());
    }

    let sink = Arc::new(ConsoleSink::new());
    if cli.list {
        let lister = Arc::new(
            Lister::new(&config, sink).context("Failed to initialise HTTP client")?,
        );
        let summary = lister.run(&target).await;
        print_listing_summary(&summary);
    } else {
        let enumerator = Arc::new(
            Enumerator::new(&config, sink).context("Failed to initialise enumerator")?,
        );
        let summary = enumerator.run(&target).await;
        print_enumeration_summary(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("burrow=info,warn"),
            1 => EnvFilter::new("burrow=debug,info"),
            2 => EnvFilter::new("burrow=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file, if any, and applies CLI overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_depth) = cli.max_depth {
        config.enumeration.max_depth = max_depth;
    }
    if let Some(concurrency) = cli.concurrency {
        anyhow::ensure!(
            (1..=1024).contains(&concurrency),
            "--concurrency must be between 1 and 1024, got {}",
            concurrency
        );
        config.enumeration.max_concurrent_requests = concurrency;
    }

    Ok(config)
}

fn print_dry_run(config: &Config, target: &str) {
    println!("=== Burrow Dry Run ===\n");
    println!("Target: {}", target);

    println!("\nRequest:");
    println!("  User agent: {}", config.request.user_agent);
    println!("  Timeout: {}s", config.request.timeout_secs);
    println!(
        "  Cookies: {}",
        if config.request.cookies.is_some() {
            "set"
        } else {
            "none"
        }
    );

    println!("\nEnumeration:");
    println!("  Max depth: {}", config.enumeration.max_depth);
    println!("  Max list depth: {}", config.enumeration.max_list_depth);
    println!(
        "  Max concurrent requests: {}",
        config.enumeration.max_concurrent_requests
    );
    match &config.enumeration.wordlist_path {
        Some(path) => println!("  Wordlist: {}", path.display()),
        None => println!("  Wordlist: built-in"),
    }

    println!("\nHeuristics:");
    println!(
        "  Confirm threshold: {}/5",
        config.heuristics.confirm_threshold
    );
    println!(
        "  Signature length: {} bytes",
        config.heuristics.signature_length
    );
    println!("  OK status codes: {:?}", config.heuristics.ok_status_codes);
    println!(
        "  Directory patterns ({}):",
        config.heuristics.directory_patterns.len()
    );
    for pattern in &config.heuristics.directory_patterns {
        println!("    - {}", pattern);
    }
}

fn print_enumeration_summary(summary: &EnumerationSummary) {
    println!();
    println!("{}", "=== Enumeration Summary ===".bold());
    println!("  Root: {}", summary.root);
    println!("  Started: {}", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Nodes explored: {}", summary.nodes_visited);
    for url in &summary.visited {
        tracing::debug!("Explored {}", url);
    }
    println!(
        "  Directories found: {} ({} by probing)",
        summary.directories.len(),
        summary.probed().count()
    );
    println!("  Elapsed: {:.2}s", summary.elapsed.as_secs_f64());
}

fn print_listing_summary(summary: &ListingSummary) {
    println!();
    println!("{}", "=== Listing Summary ===".bold());
    println!("  Root: {}", summary.root);
    println!("  Started: {}", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Directories: {}", summary.directories.len());
    println!("  Files: {}", summary.files.len());
    println!("  Elapsed: {:.2}s", summary.elapsed.as_secs_f64());
}
