//! Result persistence.
//!
//! Two tables: `operators` (one row per distinct MNC/MCC/operator per stored
//! batch) and `available_fqdns` (one row per discovered name).

mod insert;
mod migrations;
mod pool;
mod query;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export public API
pub use insert::{insert_results, InsertSummary};
pub use migrations::run_migrations;
pub use pool::{close_pool, init_db_pool_with_path, DbPool};
pub use query::{get_all_operators, get_stats, query_by_mnc_mcc, query_by_operator};
