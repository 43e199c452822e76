//! Export format selection.

use std::path::Path;

use crate::error_handling::ExportError;

const RESULT_FORMATS: &str = ".json, .csv, or .txt";
const PROBE_FORMATS: &str = ".json or .csv";

/// Output format, chosen from the output file's extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array
    Json,
    /// CSV with a header row
    Csv,
    /// One FQDN per line
    Text,
}

impl ExportFormat {
    /// Format for scan results: `.json`, `.csv` or `.txt` (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        match extension(path).as_deref() {
            Some("json") => Ok(ExportFormat::Json),
            Some("csv") => Ok(ExportFormat::Csv),
            Some("txt") => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat(RESULT_FORMATS)),
        }
    }

    /// Format for probe results. Plain text isn't offered for probes.
    pub fn for_probes(path: &Path) -> Result<Self, ExportError> {
        match extension(path).as_deref() {
            Some("json") => Ok(ExportFormat::Json),
            Some("csv") => Ok(ExportFormat::Csv),
            _ => Err(ExportError::UnsupportedFormat(PROBE_FORMATS)),
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.json")).unwrap(),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("dir/out.CSV")).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.txt")).unwrap(),
            ExportFormat::Text
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ExportFormat::from_path(Path::new("out.xml")).unwrap_err();
        assert_eq!(err.to_string(), "unsupported format (use .json, .csv, or .txt)");
        assert!(ExportFormat::from_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_probe_formats_exclude_text() {
        assert_eq!(
            ExportFormat::for_probes(Path::new("ping.json")).unwrap(),
            ExportFormat::Json
        );
        let err = ExportFormat::for_probes(Path::new("ping.txt")).unwrap_err();
        assert_eq!(err.to_string(), "unsupported format (use .json or .csv)");
    }
}
