//! Read queries over stored results.

use std::collections::BTreeMap;

use sqlx::{Pool, Row, Sqlite};

use crate::domain::parse_fqdn;
use crate::error_handling::DatabaseError;
use crate::models::{OperatorEntry, Stats};

/// FQDNs of every operator recorded with this MNC and MCC.
pub async fn query_by_mnc_mcc(
    pool: &Pool<Sqlite>,
    mnc: u32,
    mcc: u32,
) -> Result<Vec<String>, DatabaseError> {
    let fqdns = sqlx::query_scalar(
        "SELECT fqdn
         FROM available_fqdns
         WHERE operator IN (
             SELECT operator
             FROM operators
             WHERE mnc = ? AND mcc = ?
         )
         ORDER BY rowid",
    )
    .bind(i64::from(mnc))
    .bind(i64::from(mcc))
    .fetch_all(pool)
    .await?;
    Ok(fqdns)
}

/// FQDNs stored for an exact operator name.
pub async fn query_by_operator(
    pool: &Pool<Sqlite>,
    operator: &str,
) -> Result<Vec<String>, DatabaseError> {
    let fqdns = sqlx::query_scalar("SELECT fqdn FROM available_fqdns WHERE operator = ? ORDER BY rowid")
        .bind(operator)
        .fetch_all(pool)
        .await?;
    Ok(fqdns)
}

/// Distinct operators, ordered by MCC then MNC.
///
/// Only the code and name fields of each entry are populated.
pub async fn get_all_operators(pool: &Pool<Sqlite>) -> Result<Vec<OperatorEntry>, DatabaseError> {
    let rows = sqlx::query("SELECT DISTINCT mnc, mcc, operator FROM operators ORDER BY mcc, mnc")
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| {
            let mnc: i64 = row.try_get("mnc")?;
            let mcc: i64 = row.try_get("mcc")?;
            let operator: String = row.try_get("operator")?;
            Ok(OperatorEntry::new(mcc.to_string(), mnc.to_string(), operator))
        })
        .collect()
}

/// Summary of everything stored.
///
/// The MCC distribution counts operator rows per MCC. Subdomain counts come
/// from the stored names; addresses aren't stored, so `total_ips` is zero.
pub async fn get_stats(pool: &Pool<Sqlite>) -> Result<Stats, DatabaseError> {
    let total_fqdns: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM available_fqdns")
        .fetch_one(pool)
        .await?;
    let unique_operators: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT operator) FROM operators")
        .fetch_one(pool)
        .await?;

    let mut mcc_distribution = BTreeMap::new();
    let rows = sqlx::query("SELECT mcc, COUNT(*) AS count FROM operators GROUP BY mcc")
        .fetch_all(pool)
        .await?;
    for row in rows {
        let mcc: i64 = row.try_get("mcc")?;
        let count: i64 = row.try_get("count")?;
        mcc_distribution.insert(mcc.to_string(), count_to_usize(count));
    }

    let mut subdomain_counts = BTreeMap::new();
    let fqdns: Vec<String> = sqlx::query_scalar("SELECT fqdn FROM available_fqdns")
        .fetch_all(pool)
        .await?;
    for fqdn in &fqdns {
        if let Some(parts) = parse_fqdn(fqdn) {
            *subdomain_counts.entry(parts.label).or_insert(0) += 1;
        }
    }

    Ok(Stats {
        total_fqdns: count_to_usize(total_fqdns),
        mcc_distribution,
        subdomain_counts,
        unique_operators: count_to_usize(unique_operators),
        total_ips: 0,
    })
}

fn count_to_usize(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}
