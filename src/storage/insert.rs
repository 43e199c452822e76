//! Batch insertion of scan results.

use std::collections::HashSet;

use sqlx::{Pool, Sqlite};

use crate::error_handling::DatabaseError;
use crate::models::ResolutionResult;

/// Row counts written by [`insert_results`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertSummary {
    pub operators: usize,
    pub fqdns: usize,
}

/// Persists a scan's results in one transaction.
///
/// Each distinct (MNC, MCC, operator) in the batch gets one `operators` row and
/// every result gets one `available_fqdns` row. Deduplication is per batch only;
/// running the same scan twice stores its operators twice. Any failure rolls the
/// whole batch back.
pub async fn insert_results(
    pool: &Pool<Sqlite>,
    results: &[ResolutionResult],
) -> Result<InsertSummary, DatabaseError> {
    let mut tx = pool.begin().await?;
    let mut seen: HashSet<(u32, u32, &str)> = HashSet::new();
    let mut summary = InsertSummary::default();

    for result in results {
        if seen.insert((result.mnc, result.mcc, result.operator.as_str())) {
            sqlx::query("INSERT INTO operators (mnc, mcc, operator) VALUES (?, ?, ?)")
                .bind(i64::from(result.mnc))
                .bind(i64::from(result.mcc))
                .bind(&result.operator)
                .execute(&mut *tx)
                .await?;
            summary.operators += 1;
        }

        sqlx::query("INSERT INTO available_fqdns (operator, fqdn) VALUES (?, ?)")
            .bind(&result.operator)
            .bind(&result.fqdn)
            .execute(&mut *tx)
            .await?;
        summary.fqdns += 1;
    }

    tx.commit().await?;
    Ok(summary)
}
