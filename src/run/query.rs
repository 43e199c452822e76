use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::config::{validate_query, validate_stats, DEFAULT_DB_PATH};
use crate::export::{write_fqdn_list, ExportFormat};
use crate::models::Stats;
use crate::stats::{analyze_file, render_stats, StatsFormat};
use crate::storage::{
    close_pool, get_stats, init_db_pool_with_path, query_by_mnc_mcc, query_by_operator,
    run_migrations, DbPool,
};

/// Machine-readable rendering of a query's FQDN list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum QueryExport {
    Json,
    Csv,
}

impl From<QueryExport> for ExportFormat {
    fn from(value: QueryExport) -> Self {
        match value {
            QueryExport::Json => ExportFormat::Json,
            QueryExport::Csv => ExportFormat::Csv,
        }
    }
}

/// What a query looks up. A code pair wins over an operator name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    Codes { mnc: u32, mcc: u32 },
    Operator(String),
}

impl std::fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryTarget::Codes { mnc, mcc } => write!(f, "MNC={mnc}, MCC={mcc}"),
            QueryTarget::Operator(name) => write!(f, "operator={name}"),
        }
    }
}

/// Options for `query`.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub db: PathBuf,
    pub mnc: Option<u32>,
    pub mcc: Option<u32>,
    pub operator: Option<String>,
    pub export: Option<QueryExport>,
    /// Omit the heading and footer around a plain listing
    pub quiet: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            db: PathBuf::from(DEFAULT_DB_PATH),
            mnc: None,
            mcc: None,
            operator: None,
            export: None,
            quiet: false,
        }
    }
}

impl QueryOptions {
    /// Validates the arguments and picks what to look up.
    pub fn target(&self) -> Result<QueryTarget> {
        validate_query(self.mnc, self.mcc, self.operator.as_deref())?;
        Ok(match (self.mnc, self.mcc, &self.operator) {
            (Some(mnc), Some(mcc), _) => QueryTarget::Codes { mnc, mcc },
            (_, _, Some(operator)) => QueryTarget::Operator(operator.clone()),
            // validate_query rejects every other combination
            _ => anyhow::bail!("either --mnc/--mcc or --operator required"),
        })
    }
}

async fn open_database(path: &std::path::Path) -> Result<DbPool> {
    let pool = init_db_pool_with_path(path)
        .await
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(pool)
}

fn write_query_output<W: Write>(
    mut writer: W,
    target: &QueryTarget,
    fqdns: &[String],
    export: Option<QueryExport>,
    quiet: bool,
) -> Result<()> {
    if let Some(format) = export {
        write_fqdn_list(writer, fqdns, format.into())?;
        return Ok(());
    }
    if !quiet {
        writeln!(writer, "Results for {target}:")?;
    }
    for fqdn in fqdns {
        writeln!(writer, "{fqdn}")?;
    }
    if !quiet {
        writeln!(writer, "\nFound {} FQDNs", fqdns.len())?;
    }
    writer.flush()?;
    Ok(())
}

/// Looks up stored FQDNs by code pair or operator name and prints them.
pub async fn run_query(options: &QueryOptions) -> Result<Vec<String>> {
    let target = options.target()?;
    let pool = open_database(&options.db).await?;
    let fqdns = match &target {
        QueryTarget::Codes { mnc, mcc } => query_by_mnc_mcc(&pool, *mnc, *mcc).await,
        QueryTarget::Operator(name) => query_by_operator(&pool, name).await,
    }
    .context("Query failed")?;
    close_pool(&pool).await;

    write_query_output(
        crate::export::stdout(),
        &target,
        &fqdns,
        options.export,
        options.quiet,
    )
    .context("Failed to print results")?;
    Ok(fqdns)
}

/// Options for `stats`: exactly one of `file` or `db`.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    pub file: Option<PathBuf>,
    pub db: Option<PathBuf>,
    pub format: StatsFormat,
}

/// Computes statistics from an FQDN file or the database and prints them.
pub async fn run_stats(options: &StatsOptions) -> Result<Stats> {
    validate_stats(options.file.as_deref(), options.db.as_deref())?;

    let stats = if let Some(file) = &options.file {
        analyze_file(file).with_context(|| format!("Failed to analyze {}", file.display()))?
    } else if let Some(db) = &options.db {
        let pool = open_database(db).await?;
        let stats = get_stats(&pool).await.context("Failed to read statistics")?;
        close_pool(&pool).await;
        stats
    } else {
        anyhow::bail!("either --file or --db required");
    };

    let rendered = render_stats(&stats, options.format)?;
    let mut stdout = crate::export::stdout();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush())
        .context("Failed to print statistics")?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_target_prefers_codes() {
        let options = QueryOptions {
            mnc: Some(1),
            mcc: Some(310),
            operator: Some("Acme".to_string()),
            ..Default::default()
        };
        assert_eq!(
            options.target().unwrap(),
            QueryTarget::Codes { mnc: 1, mcc: 310 }
        );
    }

    #[test]
    fn test_query_target_operator_and_errors() {
        let options = QueryOptions {
            operator: Some("Acme".to_string()),
            ..Default::default()
        };
        assert_eq!(
            options.target().unwrap(),
            QueryTarget::Operator("Acme".to_string())
        );

        let options = QueryOptions {
            mnc: Some(1),
            ..Default::default()
        };
        assert_eq!(
            options.target().unwrap_err().to_string(),
            "--mnc and --mcc must be used together"
        );
    }

    #[test]
    fn test_plain_query_output() {
        let mut buf = Vec::new();
        let fqdns = vec!["ims.mnc001.mcc310.pub.3gppnetwork.org".to_string()];
        write_query_output(
            &mut buf,
            &QueryTarget::Codes { mnc: 1, mcc: 310 },
            &fqdns,
            None,
            false,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Results for MNC=1, MCC=310:\nims.mnc001.mcc310.pub.3gppnetwork.org\n\nFound 1 FQDNs\n"
        );
    }

    #[test]
    fn test_quiet_and_exported_query_output() {
        let fqdns = vec!["gan.mnc002.mcc208.pub.3gppnetwork.org".to_string()];
        let target = QueryTarget::Operator("Beta".to_string());

        let mut buf = Vec::new();
        write_query_output(&mut buf, &target, &fqdns, None, true).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "gan.mnc002.mcc208.pub.3gppnetwork.org\n"
        );

        let mut buf = Vec::new();
        write_query_output(&mut buf, &target, &fqdns, Some(QueryExport::Csv), false).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "FQDN\ngan.mnc002.mcc208.pub.3gppnetwork.org\n"
        );
    }
}
