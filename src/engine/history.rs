use super::Ledger;
use crate::domain::{EntryId, HistoryRecord, LedgerEntry, PlayerId, Reversal, Timestamp};
use crate::error::LedgerError;
use tracing::info;

impl Ledger {
    /// Add a point delta to a player and record it in the ledger.
    ///
    /// The running total update and the new entry commit together; the
    /// entry's `total_after` is the new running total.
    pub async fn add_points(&self, player_id: PlayerId, delta: i64) -> Result<LedgerEntry, LedgerError> {
        if !self.delta_policy.permits(delta) {
            return Err(LedgerError::InvalidDelta);
        }

        let entry = self
            .repo
            .apply_points(player_id, delta, Timestamp::now())
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Player {}", player_id)))?;

        info!(
            player_id = %player_id,
            delta,
            new_total = entry.total_after,
            entry_id = %entry.id,
            "Points added"
        );
        Ok(entry)
    }

    /// Ledger history, newest first, optionally for one player by exact name.
    pub async fn history(&self, player_name: Option<&str>) -> Result<Vec<HistoryRecord>, LedgerError> {
        Ok(self.repo.history(player_name).await?)
    }

    /// Undo one ledger entry: its delta leaves the running total and the entry is deleted.
    ///
    /// Other entries keep the `total_after` they were recorded with.
    pub async fn reverse_entry(&self, entry_id: EntryId) -> Result<Reversal, LedgerError> {
        let reversal = self
            .repo
            .reverse_entry(entry_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("History entry {}", entry_id)))?;

        info!(
            entry_id = %entry_id,
            player_id = %reversal.player_id,
            points_removed = reversal.points_removed,
            new_total = reversal.new_total,
            "Ledger entry reversed"
        );
        Ok(reversal)
    }

    /// Drop every ledger entry while keeping each player's running total.
    pub async fn clear_history(&self) -> Result<u64, LedgerError> {
        let removed = self.repo.clear_ledger().await?;
        info!(removed, "Ledger history cleared");
        Ok(removed)
    }
}
