//! Command-line interface.
//!
//! The clap command tree and its conversion into the option structs the `run`
//! layer takes. Defaults mirror the library defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::{warn, LevelFilter};
use tokio_util::sync::CancellationToken;

use crate::config::{
    LogFormat, LogLevel, ProbeConfig, ScanConfig, ScanMode, DEFAULT_CONCURRENCY, DEFAULT_DB_PATH,
    DEFAULT_PARENT_DOMAIN, DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_PROBE_WORKERS,
    DEFAULT_QUERY_DELAY_MS, DEFAULT_TCP_PORTS,
};
use crate::models::ProbeMethod;
use crate::run::{
    run_fetch, run_probe, run_query, run_scan, run_stats, FetchOptions, ProbeOptions,
    QueryExport, QueryOptions, ScanOptions, StatsOptions,
};
use crate::stats::StatsFormat;

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Scan only ePDG endpoints
/// gpp_scanner scan --mode epdg
///
/// # Scan everything, save to a database, 20 workers
/// gpp_scanner scan --mode all --db database.db --concurrency 20
///
/// # TCP reachability of a saved list
/// gpp_scanner ping --file results.txt --method tcp
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "gpp_scanner",
    version,
    about = "3GPP network discovery and analysis tool",
    long_about = "Enumerates 3GPP operator service names (ePDG, IMS, BSF, GAN, XCAP) \
                  across MCC-MNC combinations, and checks what it finds."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log every discovered name and keep failed probes in the output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan 3GPP network infrastructure via DNS
    Scan(ScanArgs),
    /// Test connectivity to discovered FQDNs
    Ping(PingArgs),
    /// Query the database for operator information
    Query(QueryArgs),
    /// Generate statistics from scan results
    Stats(StatsArgs),
    /// Download the MCC-MNC list
    #[command(name = "fetch-mccmnc")]
    FetchMccmnc(FetchArgs),
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Which subdomains to scan
    #[arg(short, long, value_enum, default_value_t = ScanMode::All)]
    pub mode: ScanMode,

    /// Comma-separated subdomain list, for --mode custom
    #[arg(long)]
    pub subdomains: Option<String>,

    /// Save results to this SQLite database
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Output file (.json, .csv or .txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of concurrent DNS workers
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Delay between queries in milliseconds, across all workers
    #[arg(long, default_value_t = DEFAULT_QUERY_DELAY_MS)]
    pub delay: u64,

    /// Use a local MCC-MNC JSON file instead of fetching
    #[arg(long)]
    pub mccmnc_file: Option<PathBuf>,

    /// Parent domain appended after the MCC group
    #[arg(long, default_value = DEFAULT_PARENT_DOMAIN)]
    pub parent_domain: String,

    /// Directory for the cached MCC-MNC list
    #[arg(long, default_value = ".")]
    pub cache_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct PingArgs {
    /// File containing FQDNs (one per line)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Ping method
    #[arg(long, value_enum, default_value_t = ProbeMethod::Icmp)]
    pub method: ProbeMethod,

    /// Timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_MS)]
    pub timeout: u64,

    /// Number of concurrent ping workers
    #[arg(short, long, default_value_t = DEFAULT_PROBE_WORKERS)]
    pub workers: usize,

    /// Output file (.json or .csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Mobile Network Code
    #[arg(long)]
    pub mnc: Option<u32>,

    /// Mobile Country Code
    #[arg(long)]
    pub mcc: Option<u32>,

    /// Operator name (exact match)
    #[arg(long)]
    pub operator: Option<String>,

    /// Database file path
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Print the list as json or csv instead of plain lines
    #[arg(long, value_enum)]
    pub export: Option<QueryExport>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// FQDN file to analyze
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Database to analyze
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = StatsFormat::Text)]
    pub format: StatsFormat,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Directory to save mcc-mnc-list.json in
    #[arg(long, default_value = ".")]
    pub cache_dir: PathBuf,
}

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// A scan or probe was cut short; partial results were still written
    Interrupted,
}

impl Cli {
    /// Effective log filter: `--quiet` wins over `--log-level`.
    pub fn log_level_filter(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else {
            self.log_level.clone().into()
        }
    }
}

impl ScanArgs {
    pub fn into_options(self, verbose: bool, quiet: bool) -> ScanOptions {
        let config = ScanConfig {
            parent_domain: self.parent_domain,
            subdomains: self.mode.subdomains(self.subdomains.as_deref()),
            query_delay: Duration::from_millis(self.delay),
            concurrency: self.concurrency,
            verbose,
            ..Default::default()
        };
        ScanOptions {
            mode: self.mode,
            config,
            db: self.db,
            output: self.output,
            mccmnc_file: self.mccmnc_file,
            fetch: FetchOptions {
                cache_dir: self.cache_dir,
                ..Default::default()
            },
            quiet,
        }
    }
}

impl PingArgs {
    /// A missing `--file` becomes an empty path, which validation rejects.
    pub fn into_options(self, verbose: bool, quiet: bool) -> ProbeOptions {
        ProbeOptions {
            file: self.file.unwrap_or_default(),
            config: ProbeConfig {
                method: self.method,
                timeout: Duration::from_millis(self.timeout),
                workers: self.workers,
                tcp_ports: DEFAULT_TCP_PORTS.to_vec(),
                verbose,
            },
            output: self.output,
            quiet,
        }
    }
}

impl QueryArgs {
    pub fn into_options(self, quiet: bool) -> QueryOptions {
        QueryOptions {
            db: self.db,
            mnc: self.mnc,
            mcc: self.mcc,
            operator: self.operator,
            export: self.export,
            quiet,
        }
    }
}

/// Runs the parsed command. `cancel` interrupts scans and probes.
pub async fn execute(cli: Cli, cancel: CancellationToken) -> Result<RunStatus> {
    let Cli {
        command,
        verbose,
        quiet,
        ..
    } = cli;

    let interrupted = match command {
        Command::Scan(args) => {
            let report = run_scan(args.into_options(verbose, quiet), cancel).await?;
            if report.cancelled {
                warn!(
                    "Scan interrupted after {}/{} names; partial results were kept",
                    report.completed_jobs, report.total_jobs
                );
            }
            report.cancelled
        }
        Command::Ping(args) => {
            let report = run_probe(args.into_options(verbose, quiet), cancel).await?;
            if report.cancelled {
                warn!("Ping interrupted; partial results were kept");
            }
            report.cancelled
        }
        Command::Query(args) => {
            run_query(&args.into_options(quiet)).await?;
            false
        }
        Command::Stats(args) => {
            run_stats(&StatsOptions {
                file: args.file,
                db: args.db,
                format: args.format,
            })
            .await?;
            false
        }
        Command::FetchMccmnc(args) => {
            run_fetch(&FetchOptions {
                cache_dir: args.cache_dir,
                ..Default::default()
            })
            .await?;
            false
        }
    };

    Ok(if interrupted {
        RunStatus::Interrupted
    } else {
        RunStatus::Completed
    })
}
