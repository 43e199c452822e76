use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::app::{
    log_progress, print_outcome_statistics, read_fqdns_from_file, shutdown_gracefully,
    spawn_progress_logger, Progress,
};
use crate::config::{validate_probe, ProbeConfig, LOGGING_INTERVAL};
use crate::error_handling::ProbeOutcome;
use crate::export::{export_probe_results, write_probe_report, ExportFormat};
use crate::probe::{filter_probe_results, Prober};

/// Everything a probe run needs.
#[derive(Debug, Clone, Default)]
pub struct ProbeOptions {
    /// FQDN list, one per line
    pub file: PathBuf,
    pub config: ProbeConfig,
    /// Export results here (`.json` or `.csv`)
    pub output: Option<PathBuf>,
    /// Don't print results to stdout
    pub quiet: bool,
}

/// Results of a probe run. Counts cover every probe, including failures the
/// presentation policy hid.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: bool,
    /// Results shown and exported
    pub presented: usize,
    pub exported: Option<PathBuf>,
    pub elapsed_seconds: f64,
}

/// Probes every name in `options.file`.
///
/// Failed probes are listed and exported only in verbose mode.
pub async fn run_probe(options: ProbeOptions, cancel: CancellationToken) -> Result<ProbeReport> {
    validate_probe(Some(options.file.as_path()), &options.config)?;
    if let Some(path) = &options.output {
        ExportFormat::for_probes(path)
            .with_context(|| format!("Cannot export results to {}", path.display()))?;
    }
    let start_time = Instant::now();

    let fqdns = read_fqdns_from_file(&options.file)
        .await
        .with_context(|| format!("Failed to read FQDNs from {}", options.file.display()))?;
    info!(
        "Pinging {} FQDNs using {} method",
        fqdns.len(),
        options.config.method
    );

    let verbose = options.config.verbose;
    let prober = Prober::new(options.config);
    let outcomes = prober.outcomes();
    let total = fqdns.len();
    let snapshot = move || Progress {
        completed: outcomes.get(ProbeOutcome::Reachable) + outcomes.get(ProbeOutcome::Unreachable),
        found: outcomes.get(ProbeOutcome::Reachable),
        total,
    };
    let cancel_logging = cancel.child_token();
    let logging_task = spawn_progress_logger(
        "probes",
        start_time,
        Duration::from_secs(LOGGING_INTERVAL),
        cancel_logging.clone(),
        snapshot.clone(),
    );

    let output = prober.probe_all(&fqdns, &cancel).await;

    shutdown_gracefully(cancel_logging, Some(logging_task)).await;
    log_progress("probes", start_time, snapshot());
    print_outcome_statistics("Probe outcomes", &prober.outcomes());

    let failed_workers = output.failed_workers;
    let succeeded = output.results.iter().filter(|r| r.success).count();
    let failed = output.results.len() - succeeded;
    let probed = output.results.len();
    let presented = filter_probe_results(output.results, verbose);

    if !options.quiet {
        let mut stdout = crate::export::stdout();
        write_probe_report(&mut stdout, &presented).context("Failed to print results")?;
        writeln!(
            stdout,
            "\nTotal: {}, Success: {}, Failed: {}",
            probed, succeeded, failed
        )
        .context("Failed to print results")?;
    }

    let mut exported = None;
    if let Some(path) = &options.output {
        export_probe_results(path, &presented)
            .with_context(|| format!("Failed to export results to {}", path.display()))?;
        info!("Exported results to: {}", path.display());
        exported = Some(path.clone());
    }

    if failed_workers > 0 {
        anyhow::bail!("{failed_workers} probe worker(s) crashed; results are incomplete");
    }

    Ok(ProbeReport {
        total: probed,
        succeeded,
        failed,
        cancelled: output.cancelled,
        presented: presented.len(),
        exported,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}
