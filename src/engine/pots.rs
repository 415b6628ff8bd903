use super::Ledger;
use crate::domain::{
    group_by_session, DailyPots, PlayerId, PotAdded, PotEntryId, PotSession, SessionDate,
    Timestamp,
};
use crate::error::LedgerError;
use tracing::info;

impl Ledger {
    /// Record one pot bought by a player today.
    ///
    /// Bumps today's counter and appends a permanent history entry in one
    /// transaction. A blank `session_name` falls back to `Session YYYY-MM-DD`.
    pub async fn add_pot(
        &self,
        player_id: PlayerId,
        session_name: Option<&str>,
    ) -> Result<PotAdded, LedgerError> {
        let at = Timestamp::now();
        let today = at.local_date();
        let session_name = session_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| today.default_session_name());

        let added = self
            .repo
            .add_pot(player_id, today, at, &session_name)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Player {}", player_id)))?;

        info!(
            player_id = %player_id,
            session_date = %today,
            pot_count = added.pot_count,
            "Pot added"
        );
        Ok(added)
    }

    /// Take one pot off today's counter, never going below zero.
    ///
    /// Returns the remaining count; a player without a counter today is left alone.
    pub async fn remove_pot(&self, player_id: PlayerId) -> Result<i64, LedgerError> {
        let today = SessionDate::today();
        let remaining = self.repo.remove_pot(player_id, today).await?;
        if let Some(pot_count) = remaining {
            info!(player_id = %player_id, session_date = %today, pot_count, "Pot removed");
        }
        Ok(remaining.unwrap_or(0))
    }

    /// Clear today's counters. Pot history is kept.
    pub async fn reset_today(&self) -> Result<u64, LedgerError> {
        let today = SessionDate::today();
        let removed = self.repo.reset_pots(today).await?;
        info!(session_date = %today, removed, "Pot counters reset");
        Ok(removed)
    }

    /// Today's counter for every player plus the grand total.
    pub async fn pots_today(&self) -> Result<DailyPots, LedgerError> {
        let today = SessionDate::today();
        let players = self.repo.daily_pots(today).await?;
        Ok(DailyPots::new(today, players))
    }

    /// Most recent pot history entries, grouped by session date.
    pub async fn pot_history(&self) -> Result<Vec<PotSession>, LedgerError> {
        let entries = self.repo.pot_history(self.pot_history_limit).await?;
        Ok(group_by_session(entries))
    }

    /// Overwrite the count of a pot history entry. Counts below 1 are rejected.
    pub async fn edit_pot_history(&self, id: PotEntryId, pot_count: i64) -> Result<(), LedgerError> {
        if pot_count < 1 {
            return Err(LedgerError::InvalidCount(pot_count));
        }
        if !self.repo.update_pot_history_count(id, pot_count).await? {
            return Err(LedgerError::NotFound(format!("Pot history entry {}", id)));
        }
        info!(pot_entry_id = %id, pot_count, "Pot history entry updated");
        Ok(())
    }

    /// Delete a pot history entry. Daily counters are not affected.
    pub async fn delete_pot_history(&self, id: PotEntryId) -> Result<(), LedgerError> {
        if !self.repo.delete_pot_history(id).await? {
            return Err(LedgerError::NotFound(format!("Pot history entry {}", id)));
        }
        info!(pot_entry_id = %id, "Pot history entry deleted");
        Ok(())
    }
}
