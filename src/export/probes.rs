//! Writers for probe results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error_handling::ExportError;
use crate::models::ProbeResult;

use super::pipe;
use super::results::CSV_TIMESTAMP_FORMAT;
use super::ExportFormat;

/// Writes probe results as a pretty-printed JSON array.
///
/// Latency is a float in milliseconds; `ip` and `error` are omitted when absent.
pub fn write_probe_json<W: Write>(mut writer: W, results: &[ProbeResult]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, results)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes probe results as CSV. Latency is left empty when unknown.
pub fn write_probe_csv<W: Write>(writer: W, results: &[ProbeResult]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "FQDN",
        "Success",
        "Latency_ms",
        "IP",
        "Method",
        "Error",
        "Timestamp",
    ])?;

    for result in results {
        let latency = if result.latency_ms() > 0.0 {
            format!("{:.2}", result.latency_ms())
        } else {
            String::new()
        };
        csv_writer.write_record([
            result.fqdn.as_str(),
            if result.success { "true" } else { "false" },
            &latency,
            result.ip.as_deref().unwrap_or_default(),
            result.method.as_str(),
            result.error.as_deref().unwrap_or_default(),
            &result.timestamp.format(CSV_TIMESTAMP_FORMAT).to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Exports probe results to `path` as JSON or CSV, by extension.
pub fn export_probe_results(path: &Path, results: &[ProbeResult]) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::for_probes(path)?;
    let writer = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Csv => write_probe_csv(writer, results)?,
        _ => write_probe_json(writer, results)?,
    }
    Ok(format)
}

/// One line per probe: address and latency, or the failure reason.
pub fn write_probe_report<W: Write>(mut writer: W, results: &[ProbeResult]) -> Result<(), ExportError> {
    for result in results {
        if result.success {
            writeln!(
                writer,
                "Pinging {} ... {} ({:.2} ms)",
                result.fqdn,
                result.ip.as_deref().unwrap_or_default(),
                result.latency_ms()
            )?;
        } else {
            writeln!(
                writer,
                "Pinging {} ... FAILED: {}",
                result.fqdn,
                result.error.as_deref().unwrap_or_default()
            )?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Prints [`write_probe_report`] to stdout.
pub fn print_probe_results(results: &[ProbeResult]) -> Result<(), ExportError> {
    write_probe_report(pipe::stdout(), results)
}
