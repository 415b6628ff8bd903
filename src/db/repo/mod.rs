//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by domain:
//! - `players.rs` - Player registration, lookup and cascading removal
//! - `ledger.rs` - Point entries, reversal and history queries
//! - `pots.rs` - Daily pot counters and the permanent pot history
//! - `seed.rs` - Sample roster loader
//!
//! Every write that touches more than one row runs in a single transaction
//! whose first statement is a write, so SQLite takes the writer lock before
//! anything is read and concurrent writers queue on `busy_timeout`.

mod ledger;
mod players;
mod pots;
mod seed;

pub use seed::SAMPLE_ROSTER;

use crate::domain::{GlobalStats, SessionDate, Timestamp};
use sqlx::sqlite::SqlitePool;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Round trip to the database, used by readiness checks.
    ///
    /// # Errors
    /// Returns an error if the store cannot answer.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // =========================================================================
    // Aggregate queries
    // =========================================================================

    /// Registry-wide totals in one round trip.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn global_stats(&self) -> Result<GlobalStats, sqlx::Error> {
        let (total_players, total_transactions, total_points, winners, losers): (
            i64,
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM players),
                (SELECT COUNT(*) FROM ledger_entries),
                (SELECT COALESCE(SUM(running_total), 0) FROM players),
                (SELECT COUNT(*) FROM players WHERE running_total > 0),
                (SELECT COUNT(*) FROM players WHERE running_total < 0)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(GlobalStats::new(
            total_players,
            total_transactions,
            total_points,
            winners,
            losers,
        ))
    }
}

fn decode_timestamp(raw: &str) -> Result<Timestamp, sqlx::Error> {
    Timestamp::parse_storage(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn decode_date(raw: &str) -> Result<SessionDate, sqlx::Error> {
    SessionDate::parse_storage(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Repository;
    use crate::db::migrations::init_db;
    use tempfile::TempDir;

    pub async fn setup_test_db() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        (Repository::new(pool), temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::setup_test_db;
    use crate::domain::{Decimal, PlayerId, Timestamp};
    use std::str::FromStr;

    #[tokio::test]
    async fn test_global_stats_empty_registry() {
        let (repo, _temp) = setup_test_db().await;

        let stats = repo.global_stats().await.unwrap();
        assert_eq!(stats.total_players, 0);
        assert_eq!(stats.total_transactions, 0);
        assert_eq!(stats.total_points, 0);
        assert_eq!(stats.winners, 0);
        assert_eq!(stats.losers, 0);
        assert_eq!(stats.even, 0);
        assert!(stats.total_dollars.is_zero());
    }

    #[tokio::test]
    async fn test_global_stats_counts() {
        let (repo, _temp) = setup_test_db().await;

        let a = repo.insert_player("a").await.unwrap();
        let b = repo.insert_player("b").await.unwrap();
        repo.insert_player("c").await.unwrap();

        let now = Timestamp::now();
        repo.apply_points(a.id, 1500, now).await.unwrap();
        repo.apply_points(a.id, -500, now).await.unwrap();
        repo.apply_points(b.id, -300, now).await.unwrap();

        let stats = repo.global_stats().await.unwrap();
        assert_eq!(stats.total_players, 3);
        assert_eq!(stats.total_transactions, 3);
        assert_eq!(stats.total_points, 700);
        assert_eq!(stats.total_dollars, Decimal::from_str("3.50").unwrap());
        assert_eq!(stats.winners, 1);
        assert_eq!(stats.losers, 1);
        assert_eq!(stats.even, 1);

        assert!(repo
            .apply_points(PlayerId::new(999), 1, now)
            .await
            .unwrap()
            .is_none());
    }
}
