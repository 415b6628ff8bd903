//! Sample roster for trying the dashboard out.

use super::Repository;
use crate::domain::Timestamp;
use chrono::Duration;
use tracing::info;

/// Sample players and the totals they start with.
pub const SAMPLE_ROSTER: &[(&str, i64)] = &[
    ("chaitu", 5140),
    ("ekku", 1500),
    ("Ravi", 700),
    ("amani", 0),
    ("hindu", 0),
    ("shanu", 0),
    ("jaya", -430),
    ("vijji", -750),
    ("kanthu", -1000),
    ("aswini", -1200),
    ("pavani", -4000),
];

impl Repository {
    /// Replace all data with `SAMPLE_ROSTER`.
    ///
    /// Each player with a non-zero total gets one ledger entry, dated two
    /// hours before `now`, that accounts for the whole total.
    ///
    /// # Errors
    /// Returns an error if the transaction fails.
    pub async fn load_sample_data(&self, now: Timestamp) -> Result<usize, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for table in ["ledger_entries", "pot_counters", "pot_history", "players"] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }

        let recorded_at = Timestamp::new(now.0 - Duration::hours(2));
        for (name, points) in SAMPLE_ROSTER {
            let player_id: i64 = sqlx::query_scalar(
                "INSERT INTO players (name, running_total) VALUES (?, ?) RETURNING id",
            )
            .bind(*name)
            .bind(*points)
            .fetch_one(&mut *tx)
            .await?;

            if *points != 0 {
                sqlx::query(
                    r#"
                    INSERT INTO ledger_entries (player_id, points_added, total_after, timestamp)
                    VALUES (?, ?, ?, ?)
                    "#,
                )
                .bind(player_id)
                .bind(*points)
                .bind(*points)
                .bind(recorded_at.to_storage_string())
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        info!(players = SAMPLE_ROSTER.len(), "Sample data loaded");
        Ok(SAMPLE_ROSTER.len())
    }
}
