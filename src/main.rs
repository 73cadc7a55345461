//! Fefelog main entry point
//!
//! Command-line interface around the archive and analysis pipelines.

use anyhow::Context;
use clap::Parser;
use fefelog::analysis::run_analysis;
use fefelog::archive::{run_archive, month_key, MonthRange};
use fefelog::config::{load_config_with_hash, Config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Fefelog: archiver and statistics engine for Fefes Blog
///
/// Downloads the blog's monthly index pages and individual posts into a
/// local archive, then computes structural and textual statistics over the
/// archived posts. Both steps are idempotent: re-running skips everything
/// already fetched.
#[derive(Parser, Debug)]
#[command(name = "fefelog")]
#[command(version)]
#[command(about = "Archiver and statistics engine for Fefes Blog", long_about = None)]
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

    /// Only download, skip the analysis pass
    #[arg(long, conflicts_with_all = ["analyze_only", "dry_run"])]
    fetch_only: bool,

    /// Only analyze the existing archive, skip downloading
    #[arg(long, conflicts_with_all = ["fetch_only", "dry_run"])]
    analyze_only: bool,

    /// Validate config and show what would be fetched without fetching
    #[arg(long, conflicts_with_all = ["fetch_only", "analyze_only"])]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    if !cli.analyze_only {
        let summary = run_archive(&config).await.context("archive run failed")?;
        println!(
            "Archive: {} month pages and {} posts fetched ({} failed), {} references discovered",
            summary.months.stored,
            summary.posts.stored,
            summary.months.failed + summary.posts.failed,
            summary.refs_discovered
        );
    }

    if !cli.fetch_only {
        run_analysis(&config).context("analysis run failed")?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fefelog=info,warn"),
            1 => EnvFilter::new("fefelog=debug,info"),
            2 => EnvFilter::new("fefelog=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be fetched
fn handle_dry_run(config: &Config) {
    println!("=== Fefelog Dry Run ===\n");

    println!("Blog:");
    println!("  Month index: {}YYYYMM", config.blog.month_url);
    println!("  Post: {}<id>", config.blog.post_url);
    println!("  Domain: {}", config.blog.domain);

    let months = MonthRange::new(&config.range).count();
    println!("\nRange:");
    println!(
        "  {} through {} ({} month pages)",
        month_key(config.range.start_year, config.range.start_month),
        month_key(config.range.end_year, config.range.end_month),
        months
    );

    println!("\nArchive:");
    println!("  Month store: {}", config.archive.month_dir);
    println!("  Post store: {}", config.archive.post_dir);

    println!("\nOutput:");
    println!("  Words: {}", config.output.words_path);
    println!("  Links: {}", config.output.links_path);
    println!("  Domains: {}", config.output.domains_path);
    println!("  Filetypes: {}", config.output.filetypes_path);
    println!("  Posting-time chart: {}", config.output.times_chart_path);
    println!(
        "  Corrected posting-time chart: {}",
        config.output.times_chart_fixed_path
    );

    println!("\n✓ Configuration is valid");
    println!("✓ Would fetch {} month index pages plus all referenced posts", months);
}
