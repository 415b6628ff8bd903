use super::Ledger;
use crate::domain::{normalize_name, Player, PlayerId};
use crate::error::LedgerError;
use tracing::info;

impl Ledger {
    /// Register a new player at zero points.
    ///
    /// The name is trimmed first; names are unique and case-sensitive.
    pub async fn register(&self, name: &str) -> Result<Player, LedgerError> {
        let name = normalize_name(name).ok_or(LedgerError::InvalidName)?;
        let player = self.repo.insert_player(&name).await?;
        info!(player_id = %player.id, name = %player.name, "Player registered");
        Ok(player)
    }

    /// All players, highest running total first.
    pub async fn players(&self) -> Result<Vec<Player>, LedgerError> {
        Ok(self.repo.list_players().await?)
    }

    pub async fn player(&self, id: PlayerId) -> Result<Player, LedgerError> {
        self.repo
            .get_player(id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Player {}", id)))
    }

    /// Remove a player with all of their ledger and pot rows.
    ///
    /// Removing an unknown id succeeds without doing anything.
    pub async fn delete_player(&self, id: PlayerId) -> Result<(), LedgerError> {
        if self.repo.delete_player(id).await? {
            info!(player_id = %id, "Player deleted");
        }
        Ok(())
    }
}
