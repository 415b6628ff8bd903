//! Daily pot counters and the permanent pot history.

use super::{decode_date, decode_timestamp, is_foreign_key_violation, Repository};
use crate::domain::{
    PlayerId, PlayerPots, PotAdded, PotEntryId, PotHistoryEntry, SessionDate, Timestamp,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

fn pot_entry_from_row(row: &SqliteRow) -> Result<PotHistoryEntry, sqlx::Error> {
    let session_date: String = row.get("session_date");
    let timestamp: String = row.get("timestamp");
    Ok(PotHistoryEntry {
        id: PotEntryId::new(row.get("id")),
        player_id: PlayerId::new(row.get("player_id")),
        player_name: row.get("name"),
        pot_count: row.get("pot_count"),
        session_date: decode_date(&session_date)?,
        timestamp: decode_timestamp(&timestamp)?,
        session_name: row.get("session_name"),
    })
}

impl Repository {
    /// Bump the player's counter for `session_date` and record one pot in the history.
    ///
    /// The upsert is the transaction's first statement, so concurrent calls for the
    /// same player and day queue on the writer lock instead of losing increments.
    /// Returns `None` when the player does not exist.
    ///
    /// # Errors
    /// Returns an error if the transaction fails.
    pub async fn add_pot(
        &self,
        player_id: PlayerId,
        session_date: SessionDate,
        at: Timestamp,
        session_name: &str,
    ) -> Result<Option<PotAdded>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let upsert: Result<i64, sqlx::Error> = sqlx::query_scalar(
            r#"
            INSERT INTO pot_counters (player_id, session_date, pot_count)
            VALUES (?, ?, 1)
            ON CONFLICT(player_id, session_date)
            DO UPDATE SET pot_count = pot_count + 1
            RETURNING pot_count
            "#,
        )
        .bind(player_id.as_i64())
        .bind(session_date.to_storage_string())
        .fetch_one(&mut *tx)
        .await;

        let pot_count = match upsert {
            Ok(count) => count,
            Err(e) if is_foreign_key_violation(&e) => return Ok(None),
            Err(e) => return Err(e),
        };

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO pot_history (player_id, pot_count, session_date, timestamp, session_name)
            VALUES (?, 1, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(player_id.as_i64())
        .bind(session_date.to_storage_string())
        .bind(at.to_storage_string())
        .bind(session_name)
        .fetch_one(&mut *tx)
        .await?;

        let player_name: String = sqlx::query_scalar("SELECT name FROM players WHERE id = ?")
            .bind(player_id.as_i64())
            .fetch_one(&mut *tx)
            .await?;

        let history = PotHistoryEntry {
            id: PotEntryId::new(id),
            player_id,
            player_name,
            pot_count: 1,
            session_date,
            timestamp: at,
            session_name: session_name.to_string(),
        };

        tx.commit().await?;

        Ok(Some(PotAdded { pot_count, history }))
    }

    /// Decrement the player's counter for `session_date`, never below zero.
    ///
    /// Returns the resulting count, or `None` when the player has no counter that day.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub async fn remove_pot(
        &self,
        player_id: PlayerId,
        session_date: SessionDate,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            UPDATE pot_counters
            SET pot_count = MAX(pot_count - 1, 0)
            WHERE player_id = ? AND session_date = ?
            RETURNING pot_count
            "#,
        )
        .bind(player_id.as_i64())
        .bind(session_date.to_storage_string())
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete every counter row for `session_date`. Pot history is not touched.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub async fn reset_pots(&self, session_date: SessionDate) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pot_counters WHERE session_date = ?")
            .bind(session_date.to_storage_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Every player's counter for `session_date` (zero when absent), ordered by name.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn daily_pots(&self, session_date: SessionDate) -> Result<Vec<PlayerPots>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, COALESCE(c.pot_count, 0) AS pot_count
            FROM players p
            LEFT JOIN pot_counters c
                ON c.player_id = p.id AND c.session_date = ?
            ORDER BY p.name ASC, p.id ASC
            "#,
        )
        .bind(session_date.to_storage_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| PlayerPots {
                player_id: PlayerId::new(row.get("id")),
                player_name: row.get("name"),
                pot_count: row.get("pot_count"),
            })
            .collect())
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub async fn pot_count_for(
        &self,
        player_id: PlayerId,
        session_date: SessionDate,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT pot_count FROM pot_counters WHERE player_id = ? AND session_date = ?",
        )
        .bind(player_id.as_i64())
        .bind(session_date.to_storage_string())
        .fetch_optional(&self.pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// The `limit` most recent pot history entries across all players, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn pot_history(&self, limit: i64) -> Result<Vec<PotHistoryEntry>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT h.id, h.player_id, p.name, h.pot_count, h.session_date,
                   h.timestamp, h.session_name
            FROM pot_history h
            JOIN players p ON h.player_id = p.id
            ORDER BY h.timestamp DESC, h.id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(pot_entry_from_row).collect()
    }

    /// Overwrite the count of one pot history entry. Returns whether it existed.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub async fn update_pot_history_count(
        &self,
        id: PotEntryId,
        pot_count: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE pot_history SET pot_count = ? WHERE id = ?")
            .bind(pot_count)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete one pot history entry. Returns whether it existed.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub async fn delete_pot_history(&self, id: PotEntryId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pot_history WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Sum of pot counts over one player's history.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn total_pots_bought(&self, player_id: PlayerId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COALESCE(SUM(pot_count), 0) FROM pot_history WHERE player_id = ?")
            .bind(player_id.as_i64())
            .fetch_one(&self.pool)
            .await
    }
}
