//! Ledger entries and the running totals they move.

use super::{decode_timestamp, Repository};
use crate::domain::{EntryId, HistoryRecord, LedgerEntry, PlayerId, Reversal, Timestamp};
use crate::error::LedgerError;
use sqlx::Row;

/// Running totals to which `delta` can be added without leaving `i64`.
fn totals_that_can_add(delta: i64) -> (i64, i64) {
    if delta >= 0 {
        (i64::MIN, i64::MAX - delta)
    } else {
        (i64::MIN - delta, i64::MAX)
    }
}

/// Running totals from which `points` can be subtracted without leaving `i64`.
fn totals_that_can_subtract(points: i64) -> (i64, i64) {
    if points >= 0 {
        (i64::MIN + points, i64::MAX)
    } else {
        (i64::MIN, i64::MAX + points)
    }
}

impl Repository {
    /// Add `delta` to a player's running total and append the matching ledger entry.
    ///
    /// Both writes commit together. Returns `None` when the player does not exist.
    ///
    /// # Errors
    /// Returns `TotalOverflow` if the new total would not fit in an `i64`,
    /// or a database error if the transaction fails.
    pub async fn apply_points(
        &self,
        player_id: PlayerId,
        delta: i64,
        at: Timestamp,
    ) -> Result<Option<LedgerEntry>, LedgerError> {
        let mut tx = self.pool.begin().await?;

        // SQLite silently widens an overflowing sum to REAL, so the row only
        // matches while the current total leaves room for `delta`.
        let (lowest, highest) = totals_that_can_add(delta);

        let new_total: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE players
            SET running_total = running_total + ?
            WHERE id = ? AND running_total BETWEEN ? AND ?
            RETURNING running_total
            "#,
        )
        .bind(delta)
        .bind(player_id.as_i64())
        .bind(lowest)
        .bind(highest)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(new_total) = new_total else {
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM players WHERE id = ?")
                .bind(player_id.as_i64())
                .fetch_optional(&mut *tx)
                .await?;
            return match exists {
                Some(_) => Err(LedgerError::TotalOverflow(delta)),
                None => Ok(None),
            };
        };

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO ledger_entries (player_id, points_added, total_after, timestamp)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(player_id.as_i64())
        .bind(delta)
        .bind(new_total)
        .bind(at.to_storage_string())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(LedgerEntry {
            id: EntryId::new(id),
            player_id,
            points_added: delta,
            total_after: new_total,
            timestamp: at,
        }))
    }

    /// Delete one entry and take its delta back out of the running total.
    ///
    /// Snapshots on the remaining entries are left untouched. Returns `None`
    /// when the entry does not exist.
    ///
    /// # Errors
    /// Returns `TotalOverflow` if taking the delta back would not fit in an
    /// `i64` (the entry is kept), or a database error if the transaction fails.
    pub async fn reverse_entry(&self, entry_id: EntryId) -> Result<Option<Reversal>, LedgerError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(
            r#"
            DELETE FROM ledger_entries
            WHERE id = ?
            RETURNING player_id, points_added
            "#,
        )
        .bind(entry_id.as_i64())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(removed) = removed else {
            return Ok(None);
        };
        let player_id: i64 = removed.get("player_id");
        let points_removed: i64 = removed.get("points_added");

        let (lowest, highest) = totals_that_can_subtract(points_removed);
        let new_total: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE players
            SET running_total = running_total - ?
            WHERE id = ? AND running_total BETWEEN ? AND ?
            RETURNING running_total
            "#,
        )
        .bind(points_removed)
        .bind(player_id)
        .bind(lowest)
        .bind(highest)
        .fetch_optional(&mut *tx)
        .await?;

        // Dropping the transaction restores the deleted entry.
        let new_total =
            new_total.ok_or(LedgerError::TotalOverflow(points_removed.wrapping_neg()))?;

        tx.commit().await?;

        Ok(Some(Reversal {
            entry_id,
            player_id: PlayerId::new(player_id),
            points_removed,
            new_total,
        }))
    }

    /// Delete every ledger entry. Running totals are left as they are.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub async fn clear_ledger(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ledger_entries")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Ledger entries joined with player names, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn history(&self, player_name: Option<&str>) -> Result<Vec<HistoryRecord>, sqlx::Error> {
        let sql = if player_name.is_some() {
            r#"
            SELECT h.id, h.player_id, p.name, h.points_added, h.total_after, h.timestamp
            FROM ledger_entries h
            JOIN players p ON h.player_id = p.id
            WHERE p.name = ?
            ORDER BY h.timestamp DESC, h.id DESC
            "#
        } else {
            r#"
            SELECT h.id, h.player_id, p.name, h.points_added, h.total_after, h.timestamp
            FROM ledger_entries h
            JOIN players p ON h.player_id = p.id
            ORDER BY h.timestamp DESC, h.id DESC
            "#
        };

        let mut query = sqlx::query(sql);
        if let Some(name) = player_name {
            query = query.bind(name);
        }
        let rows = query.fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| {
                let timestamp: String = row.get("timestamp");
                Ok(HistoryRecord {
                    id: EntryId::new(row.get("id")),
                    player_id: PlayerId::new(row.get("player_id")),
                    player_name: row.get("name"),
                    points_added: row.get("points_added"),
                    total_after: row.get("total_after"),
                    timestamp: decode_timestamp(&timestamp)?,
                })
            })
            .collect()
    }

    /// One player's ledger entries, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn player_entries(&self, player_id: PlayerId) -> Result<Vec<LedgerEntry>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, player_id, points_added, total_after, timestamp
            FROM ledger_entries
            WHERE player_id = ?
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .bind(player_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let timestamp: String = row.get("timestamp");
                Ok(LedgerEntry {
                    id: EntryId::new(row.get("id")),
                    player_id: PlayerId::new(row.get("player_id")),
                    points_added: row.get("points_added"),
                    total_after: row.get("total_after"),
                    timestamp: decode_timestamp(&timestamp)?,
                })
            })
            .collect()
    }
}
