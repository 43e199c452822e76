//! Output of scan and probe results.
//!
//! Writers are generic over `std::io::Write`, so the same code renders to files,
//! stdout and in-memory buffers. File exports pick their format from the
//! output path's extension.

mod pipe;
mod probes;
mod results;
mod types;

pub use probes::{
    export_probe_results, print_probe_results, write_probe_csv, write_probe_json,
    write_probe_report,
};
pub use results::{
    export_results, print_results, write_fqdn_list, write_results, write_results_csv,
    write_results_json, write_results_report, write_results_text,
};
pub use types::ExportFormat;

pub(crate) use pipe::stdout;

#[cfg(test)]
mod tests;
