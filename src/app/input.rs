//! FQDN list input.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Reads names one per line from `reader`.
///
/// Lines are trimmed; blank lines and `#` comments are skipped. Anything after
/// the first whitespace-separated token is ignored, so lists annotated with
/// addresses can be fed back in.
pub async fn parse_fqdn_lines<R: AsyncBufRead + Unpin>(reader: R) -> std::io::Result<Vec<String>> {
    let mut lines = reader.lines();
    let mut fqdns = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.split_whitespace().next() {
            fqdns.push(name.to_string());
        }
    }
    Ok(fqdns)
}

/// Reads an FQDN list file. See [`parse_fqdn_lines`].
pub async fn read_fqdns_from_file(path: &Path) -> std::io::Result<Vec<String>> {
    let file = File::open(path).await?;
    parse_fqdn_lines(BufReader::new(file)).await
}
