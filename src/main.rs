//! Mail-Ripple main entry point
//!
//! This is the command-line interface for the Mail-Ripple email harvester.

use anyhow::Context;
use clap::Parser;
use mail_ripple::config::{load_config, validate, Config};
use mail_ripple::crawler::harvest;
use mail_ripple::email::has_mx_with;
use mail_ripple::input::load_domains;
use mail_ripple::output::{print_statistics, EmailSink, FileSink};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Mail-Ripple: a bounded, polite email harvester
///
/// Mail-Ripple crawls each listed domain within a page and byte budget and
/// writes the addresses it finds at that domain to one file per domain.
#[derive(Parser, Debug)]
#[command(name = "mail-ripple")]
#[command(version = "1.0.0")]
#[command(about = "A bounded, polite email harvester", long_about = None)]
struct Cli {
    /// File with one domain per line
    #[arg(value_name = "DOMAINS")]
    domains: PathBuf,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of domains crawled concurrently
    #[arg(short, long)]
    workers: Option<usize>,

    /// Maximum pages visited per domain
    #[arg(long)]
    page_limit: Option<usize>,

    /// Maximum megabytes downloaded per domain
    #[arg(long)]
    byte_limit_mb: Option<u64>,

    /// Directory the per-domain files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip domains that publish no MX record
    #[arg(long)]
    check_mx: bool,

    /// Drop harvested addresses that fail a syntax check
    #[arg(long)]
    validate_emails: bool,

    /// Validate inputs and show what would be crawled without crawling
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

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    // A missing domain list stops the run before any crawling
    let domains = match load_domains(&cli.domains) {
        Ok(domains) => domains,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };
    tracing::info!(
        "Loaded {} distinct domains from {}",
        domains.len(),
        cli.domains.display()
    );

    if cli.dry_run {
        handle_dry_run(&config, &domains);
        return Ok(());
    }

    let domains = if cli.check_mx {
        filter_by_mx(domains).await
    } else {
        domains
    };

    handle_harvest(&config, domains, cli.validate_emails).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mail_ripple=info,warn"),
            1 => EnvFilter::new("mail_ripple=debug,info"),
            2 => EnvFilter::new("mail_ripple=trace,debug"),
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

/// Loads the config file (or defaults) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(page_limit) = cli.page_limit {
        config.crawler.page_limit = page_limit;
    }
    if let Some(byte_limit_mb) = cli.byte_limit_mb {
        config.crawler.byte_limit_mb = byte_limit_mb;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.display().to_string();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective settings and domains
fn handle_dry_run(config: &Config, domains: &BTreeSet<String>) {
    let sink = FileSink::from_config(&config.output);

    println!("=== Mail-Ripple Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Page limit: {}", config.crawler.page_limit);
    println!("  Byte limit: {} MB", config.crawler.byte_limit_mb);
    println!("  Workers: {}", config.crawler.workers);

    println!("\nFetcher:");
    println!("  Attempts per URL: {}", config.fetcher.max_retries);
    println!("  Delay between attempts: {}ms", config.fetcher.retry_delay_ms);
    println!("  Timeout per attempt: {}s", config.fetcher.timeout_secs);
    println!("  User agents: {}", config.fetcher.user_agents.len());

    println!("\nDomains ({}):", domains.len());
    for domain in domains {
        println!("  - {} -> {}", domain, sink.path_for(domain).display());
    }

    println!("\n✓ Configuration is valid");
}

/// Keeps only domains with at least one MX record
async fn filter_by_mx(domains: BTreeSet<String>) -> BTreeSet<String> {
    let resolver =
        match TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()) {
            Ok(resolver) => resolver,
            Err(e) => {
                tracing::warn!("MX check disabled, resolver unavailable: {}", e);
                return domains;
            }
        };

    let mut kept = BTreeSet::new();
    for domain in domains {
        if has_mx_with(&resolver, &domain).await {
            kept.insert(domain);
        } else {
            tracing::warn!("Skipping {}: no MX record", domain);
        }
    }
    kept
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: &Config,
    domains: BTreeSet<String>,
    validate_emails: bool,
) -> anyhow::Result<()> {
    let sink: Arc<dyn EmailSink> = Arc::new(FileSink::from_config(&config.output));

    tracing::info!(
        "Harvesting {} domains with {} workers",
        domains.len(),
        config.crawler.workers
    );

    match harvest(config, domains, sink, validate_emails).await {
        Ok(stats) => {
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
