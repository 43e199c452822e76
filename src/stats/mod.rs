//! Summary statistics over discovered names.
//!
//! Statistics come from three places: a finished scan's results, a text file of
//! FQDNs (one per line, optionally followed by addresses), or the database
//! (see [`crate::storage::get_stats`]). All of them produce a [`Stats`].

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;

use crate::models::{ResolutionResult, Stats};

static MCC_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"mcc(\d+)\.").ok());

/// Number of MCCs shown in the text rendering.
const TOP_MCCS: usize = 10;

/// Rendering of a [`Stats`] summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    /// Human-readable report
    #[default]
    Text,
    /// The `Stats` record as JSON
    Json,
    /// `category,key,count` rows
    Csv,
}

/// Summarizes a scan's results.
///
/// MCCs are keyed by their decimal value without padding; subdomains by the
/// full label (`epdg.epc`, not `epdg`).
pub fn analyze_results(results: &[ResolutionResult]) -> Stats {
    let mut stats = Stats::default();
    let mut operators = HashSet::new();
    let mut ips = HashSet::new();

    for result in results {
        stats.total_fqdns += 1;
        *stats.mcc_distribution.entry(result.mcc.to_string()).or_insert(0) += 1;
        *stats
            .subdomain_counts
            .entry(result.subdomain.clone())
            .or_insert(0) += 1;
        operators.insert(result.operator.as_str());
        ips.extend(result.ips.iter().copied());
    }

    stats.unique_operators = operators.len();
    stats.total_ips = ips.len();
    stats
}

/// Summarizes FQDN lines read from `reader`.
///
/// Blank lines and `#` comments are skipped, and every other line counts as
/// one FQDN. The MCC is
/// the digits of the first `mcc<digits>.` group, as written. The subdomain is
/// the first label only. Whitespace-separated tokens after the name count as
/// addresses, deduplicated across the file. Operators can't be recovered from
/// names, so `unique_operators` stays zero.
pub fn analyze_fqdn_lines<R: BufRead>(reader: R) -> io::Result<Stats> {
    let mut stats = Stats::default();
    let mut ips: HashSet<String> = HashSet::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        stats.total_fqdns += 1;

        if let Some(caps) = MCC_PATTERN.as_ref().and_then(|re| re.captures(line)) {
            *stats
                .mcc_distribution
                .entry(caps[1].to_string())
                .or_insert(0) += 1;
        }

        if let Some((label, _)) = line.split_once('.') {
            if !label.is_empty() {
                *stats.subdomain_counts.entry(label.to_string()).or_insert(0) += 1;
            }
        }

        ips.extend(line.split_whitespace().skip(1).map(String::from));
    }

    stats.total_ips = ips.len();
    Ok(stats)
}

/// Summarizes an FQDN list file. See [`analyze_fqdn_lines`].
pub fn analyze_file(path: &Path) -> io::Result<Stats> {
    let file = File::open(path)?;
    analyze_fqdn_lines(BufReader::new(file))
}

/// Entries sorted by count descending, ties by key ascending.
fn by_count(map: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut pairs: Vec<(&str, usize)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    // BTreeMap iteration is already key-ordered and the sort is stable
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}

/// Human-readable report: totals, the top MCCs, then every subdomain.
pub fn format_stats(stats: &Stats) -> String {
    let mut out = String::new();
    out.push_str("=== 3GPP Scanner Statistics ===\n\n");
    out.push_str(&format!("Total FQDNs: {}\n", stats.total_fqdns));
    out.push_str(&format!("Total IPs: {}\n", stats.total_ips));
    out.push_str(&format!("Unique Operators: {}\n\n", stats.unique_operators));

    if !stats.mcc_distribution.is_empty() {
        out.push_str(&format!("MCC Distribution (Top {TOP_MCCS}):\n"));
        for (mcc, count) in by_count(&stats.mcc_distribution).into_iter().take(TOP_MCCS) {
            out.push_str(&format!("  MCC {mcc}: {count}\n"));
        }
        out.push('\n');
    }

    if !stats.subdomain_counts.is_empty() {
        out.push_str("Subdomain Distribution:\n");
        for (subdomain, count) in by_count(&stats.subdomain_counts) {
            out.push_str(&format!("  {subdomain}: {count}\n"));
        }
        out.push('\n');
    }

    out
}

/// `category,key,count` rows: the totals first, then every MCC and subdomain.
pub fn format_stats_csv(stats: &Stats) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["category", "key", "count"])?;
    writer.write_record(["total", "fqdns", &stats.total_fqdns.to_string()])?;
    writer.write_record(["total", "ips", &stats.total_ips.to_string()])?;
    writer.write_record(["total", "operators", &stats.unique_operators.to_string()])?;
    for (mcc, count) in by_count(&stats.mcc_distribution) {
        writer.write_record(["mcc", mcc, &count.to_string()])?;
    }
    for (subdomain, count) in by_count(&stats.subdomain_counts) {
        writer.write_record(["subdomain", subdomain, &count.to_string()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Renders `stats` in the requested format.
pub fn render_stats(stats: &Stats, format: StatsFormat) -> anyhow::Result<String> {
    Ok(match format {
        StatsFormat::Text => format_stats(stats),
        StatsFormat::Json => {
            let mut json = serde_json::to_string_pretty(stats)?;
            json.push('\n');
            json
        }
        StatsFormat::Csv => format_stats_csv(stats)?,
    })
}
