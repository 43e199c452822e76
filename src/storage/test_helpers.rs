//! Shared test helpers for storage module tests.

use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::domain::build_fqdn;
use crate::models::ResolutionResult;
use crate::storage::run_migrations;

/// Creates an in-memory database with migrations applied.
///
/// Limited to one connection, since every in-memory connection is its own database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Builds a result for `label` under the 3GPP public domain.
pub fn test_result(label: &str, mnc: u32, mcc: u32, operator: &str) -> ResolutionResult {
    ResolutionResult {
        fqdn: build_fqdn(label, mnc, mcc, "pub.3gppnetwork.org"),
        ips: vec!["192.0.2.1".parse().expect("valid address")],
        subdomain: label.to_string(),
        mnc,
        mcc,
        operator: operator.to_string(),
        timestamp: Utc::now(),
    }
}
