//! Page-Analyzer main entry point
//!
//! This is the command-line interface for the Page-Analyzer page inspector.

use anyhow::Context;
use clap::Parser;
use page_analyzer::config::{load_config, validate, Config};
use page_analyzer::output::{format_report, write_markdown_report};
use page_analyzer::Analyzer;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Page-Analyzer: single page structure inspection
///
/// Fetches one page and reports its HTML version, title, heading counts,
/// internal and external links, unreachable links, and whether it has a
/// login form.
#[derive(Parser, Debug)]
#[command(name = "page-analyzer")]
#[command(version)]
#[command(about = "Inspect the structure of a single web page", long_about = None)]
struct Cli {
    /// Page to analyze; `https://` is assumed when no scheme is given
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Page fetch timeout in seconds
    #[arg(long, value_name = "SECS")]
    fetch_timeout: Option<u64>,

    /// Per-link probe timeout in seconds
    #[arg(long, value_name = "SECS")]
    probe_timeout: Option<u64>,

    /// Maximum redirects followed for the page fetch
    #[arg(long, value_name = "N")]
    max_redirects: Option<usize>,

    /// Maximum number of link probes in flight
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Also write a markdown report to this file
    #[arg(long, value_name = "FILE")]
    markdown: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    let analyzer = Analyzer::new(&config).context("failed to initialize HTTP clients")?;

    // Ctrl-C cancels the fetch and every in-flight link probe
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling analysis");
            signal_token.cancel();
        }
    });

    let outcome = analyzer.analyze(&cli.url, &cancel).await;

    if let Err(e) = &outcome {
        tracing::error!("Analysis failed: {}", e);
    }

    if !cli.quiet || outcome.is_err() {
        print!("{}", format_report(&cli.url, &outcome));
    }

    if let Some(path) = &cli.markdown {
        write_markdown_report(&cli.url, &outcome, path)
            .with_context(|| format!("failed to write markdown report to {}", path.display()))?;
        tracing::info!("Markdown report written to: {}", path.display());
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_analyzer=info,warn"),
            1 => EnvFilter::new("page_analyzer=debug,info"),
            2 => EnvFilter::new("page_analyzer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, if any, and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(secs) = cli.fetch_timeout {
        config.analyzer.fetch_timeout_secs = secs;
    }
    if let Some(secs) = cli.probe_timeout {
        config.analyzer.probe_timeout_secs = secs;
    }
    if let Some(hops) = cli.max_redirects {
        config.analyzer.max_redirects = hops;
    }
    if let Some(n) = cli.concurrency {
        config.analyzer.max_concurrent_probes = n;
    }

    validate(&config).context("invalid command-line override")?;

    Ok(config)
}
