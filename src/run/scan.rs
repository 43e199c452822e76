use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::app::{
    log_progress, print_outcome_statistics, shutdown_gracefully, spawn_progress_logger, Progress,
};
use crate::config::{validate_scan, ScanConfig, ScanMode, LOGGING_INTERVAL};
use crate::error_handling::JobOutcome;
use crate::export::{export_results, print_results, ExportFormat};
use crate::scanner::Scanner;
use crate::storage::{close_pool, init_db_pool_with_path, insert_results, run_migrations, InsertSummary};

use super::fetch::{load_operators, FetchOptions};

/// Everything a scan run needs.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub mode: ScanMode,
    pub config: ScanConfig,
    /// Save results to this SQLite database
    pub db: Option<PathBuf>,
    /// Export results here; format from the extension
    pub output: Option<PathBuf>,
    /// Read operators from this file instead of fetching
    pub mccmnc_file: Option<PathBuf>,
    pub fetch: FetchOptions,
    /// Don't print results to stdout
    pub quiet: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            mode: ScanMode::All,
            config: ScanConfig::default(),
            db: None,
            output: None,
            mccmnc_file: None,
            fetch: FetchOptions::default(),
            quiet: false,
        }
    }
}

/// Results of a scan run.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Names generated
    pub total_jobs: usize,
    /// Names queried to completion
    pub completed_jobs: usize,
    /// Names that resolved
    pub found: usize,
    /// Ctrl-C (or the caller's token) cut the run short
    pub cancelled: bool,
    /// Rows written when `--db` was given
    pub saved: Option<InsertSummary>,
    /// Export path when `--output` was given
    pub exported: Option<PathBuf>,
    pub elapsed_seconds: f64,
}

/// Runs a scan with hickory resolvers built from `options.config`.
///
/// # Errors
///
/// Returns an error for invalid options (including an unsupported output
/// extension, rejected before any query), an unavailable operator list, or a
/// failure to store or export results. DNS failures never fail the run, but a
/// crashed worker does, after whatever resolved has been stored and exported.
pub async fn run_scan(options: ScanOptions, cancel: CancellationToken) -> Result<ScanReport> {
    let scanner = Scanner::new(options.config.clone());
    run_scan_with(options, &scanner, cancel).await
}

/// Runs a scan on a prepared [`Scanner`], e.g. one with a custom resolver.
///
/// `options.config` is only used for validation and logging here; the scanner
/// carries its own copy.
pub async fn run_scan_with(
    options: ScanOptions,
    scanner: &Scanner,
    cancel: CancellationToken,
) -> Result<ScanReport> {
    validate_scan(options.mode, scanner.config())?;
    if let Some(path) = &options.output {
        ExportFormat::from_path(path)
            .with_context(|| format!("Cannot export results to {}", path.display()))?;
    }
    let start_time = Instant::now();

    info!(
        "Starting scan with mode={:?}, subdomains={:?}",
        options.mode,
        scanner.config().subdomains
    );

    let entries = load_operators(options.mccmnc_file.as_deref(), &options.fetch).await?;
    info!("Loaded {} MCC-MNC entries", entries.len());

    let outcomes = scanner.outcomes();
    let total_jobs = scanner.total_jobs();
    let snapshot = move || Progress {
        completed: outcomes.get(JobOutcome::Resolved) + outcomes.get(JobOutcome::Empty),
        found: outcomes.get(JobOutcome::Resolved),
        total: total_jobs.load(Ordering::SeqCst),
    };
    let cancel_logging = cancel.child_token();
    let logging_task = spawn_progress_logger(
        "names",
        start_time,
        Duration::from_secs(LOGGING_INTERVAL),
        cancel_logging.clone(),
        snapshot.clone(),
    );

    let output = scanner.scan(&entries, &cancel).await;

    shutdown_gracefully(cancel_logging, Some(logging_task)).await;
    log_progress("names", start_time, snapshot());
    print_outcome_statistics("Job outcomes", &scanner.outcomes());

    let found = output.results.len();
    if output.cancelled {
        info!("Scan interrupted! Found {} FQDNs", found);
    } else {
        info!("Scan complete! Found {} FQDNs", found);
    }

    if !options.quiet && options.output.is_none() && options.db.is_none() {
        print_results(&output.results).context("Failed to print results")?;
    }

    let mut saved = None;
    if let Some(db_path) = &options.db {
        info!("Saving results to database: {}", db_path.display());
        let pool = init_db_pool_with_path(db_path)
            .await
            .context("Failed to initialize database pool")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        let summary = insert_results(&pool, &output.results)
            .await
            .context("Failed to save results")?;
        close_pool(&pool).await;
        info!("Saved {} results to database", summary.fqdns);
        saved = Some(summary);
    }

    let mut exported = None;
    if let Some(path) = &options.output {
        export_results(path, &output.results)
            .with_context(|| format!("Failed to export results to {}", path.display()))?;
        info!("Exported results to: {}", path.display());
        exported = Some(path.clone());
    }

    // Partial results are already saved; the run itself still failed
    if output.failed_workers > 0 {
        anyhow::bail!(
            "{} scan worker(s) crashed; results are incomplete",
            output.failed_workers
        );
    }

    Ok(ScanReport {
        total_jobs: output.total_jobs,
        completed_jobs: output.completed_jobs,
        found,
        cancelled: output.cancelled,
        saved,
        exported,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}
