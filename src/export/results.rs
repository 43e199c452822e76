//! Writers for scan results and FQDN lists.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error_handling::ExportError;
use crate::models::ResolutionResult;

use super::pipe;
use super::ExportFormat;

pub(crate) const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes results as a pretty-printed JSON array.
pub fn write_results_json<W: Write>(
    mut writer: W,
    results: &[ResolutionResult],
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, results)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes results as CSV, addresses joined with `;`.
pub fn write_results_csv<W: Write>(
    writer: W,
    results: &[ResolutionResult],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "FQDN",
        "IPs",
        "Subdomain",
        "MNC",
        "MCC",
        "Operator",
        "Timestamp",
    ])?;

    for result in results {
        let ips = result
            .ips
            .iter()
            .map(|ip| ip.to_string())
            .collect::<Vec<_>>()
            .join(";");
        csv_writer.write_record([
            result.fqdn.as_str(),
            &ips,
            &result.subdomain,
            &result.mnc.to_string(),
            &result.mcc.to_string(),
            &result.operator,
            &result.timestamp.format(CSV_TIMESTAMP_FORMAT).to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes one FQDN per line.
pub fn write_results_text<W: Write>(
    mut writer: W,
    results: &[ResolutionResult],
) -> Result<(), ExportError> {
    for result in results {
        writeln!(writer, "{}", result.fqdn)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes results in `format`.
pub fn write_results<W: Write>(
    writer: W,
    results: &[ResolutionResult],
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => write_results_json(writer, results),
        ExportFormat::Csv => write_results_csv(writer, results),
        ExportFormat::Text => write_results_text(writer, results),
    }
}

/// Exports results to `path`, picking the format from its extension.
///
/// The extension is checked before the file is created, so an unsupported
/// name leaves nothing behind.
pub fn export_results(path: &Path, results: &[ResolutionResult]) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let file = File::create(path)?;
    write_results(BufWriter::new(file), results, format)?;
    Ok(format)
}

/// Writes a bare FQDN list as a JSON array or a one-column CSV.
///
/// Text is one name per line.
pub fn write_fqdn_list<W: Write>(
    mut writer: W,
    fqdns: &[String],
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, fqdns)?;
            writeln!(writer)?;
        }
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut writer);
            csv_writer.write_record(["FQDN"])?;
            for fqdn in fqdns {
                csv_writer.write_record([fqdn])?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Text => {
            for fqdn in fqdns {
                writeln!(writer, "{fqdn}")?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Human-readable listing of discovered names and their addresses.
pub fn write_results_report<W: Write>(
    mut writer: W,
    results: &[ResolutionResult],
) -> Result<(), ExportError> {
    for result in results {
        writeln!(writer, "Found A record for {}", result.fqdn)?;
        for ip in &result.ips {
            writeln!(writer, "  IP: {ip}")?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Prints [`write_results_report`] to stdout.
pub fn print_results(results: &[ResolutionResult]) -> Result<(), ExportError> {
    write_results_report(pipe::stdout(), results)
}
