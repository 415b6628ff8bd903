//! Player registry rows.

use super::{is_unique_violation, Repository};
use crate::domain::{Player, PlayerId};
use crate::error::LedgerError;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

fn player_from_row(row: &SqliteRow) -> Player {
    Player::new(
        PlayerId::new(row.get("id")),
        row.get("name"),
        row.get("running_total"),
    )
}

impl Repository {
    /// Insert a player with a zero running total.
    ///
    /// # Errors
    /// Returns `DuplicateName` if the name is taken, or a database error.
    pub async fn insert_player(&self, name: &str) -> Result<Player, LedgerError> {
        let result = sqlx::query(
            r#"
            INSERT INTO players (name, running_total)
            VALUES (?, 0)
            RETURNING id, name, running_total
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(player_from_row(&row)),
            Err(e) if is_unique_violation(&e) => Err(LedgerError::DuplicateName(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// All players, highest running total first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_players(&self) -> Result<Vec<Player>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, running_total
            FROM players
            ORDER BY running_total DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(player_from_row).collect())
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, sqlx::Error> {
        let row = sqlx::query("SELECT id, name, running_total FROM players WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(player_from_row))
    }

    /// Delete a player together with their ledger entries, pot counters and pot history.
    ///
    /// Returns whether the player existed.
    ///
    /// # Errors
    /// Returns an error if the transaction fails.
    pub async fn delete_player(&self, id: PlayerId) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for table in ["ledger_entries", "pot_counters", "pot_history"] {
            sqlx::query(&format!("DELETE FROM {} WHERE player_id = ?", table))
                .bind(id.as_i64())
                .execute(&mut *tx)
                .await?;
        }

        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
