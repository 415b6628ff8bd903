//! Read-side views derived from the ledger at query time.

use super::Ledger;
use crate::domain::{
    points_to_dollars, pots_earned, Decimal, EntryId, GlobalStats, LedgerEntry, Player, PlayerId,
    PlayerStats, PotStats, Status, Timestamp,
};
use crate::error::LedgerError;
use serde::Serialize;

/// A player with their dollar amount and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub running_total: i64,
    pub dollar_amount: Decimal,
    pub status: Status,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        PlayerSummary {
            id: player.id,
            name: player.name.clone(),
            running_total: player.running_total,
            dollar_amount: player.dollar_amount(),
            status: player.status(),
        }
    }
}

/// A ledger entry as shown on a player's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub id: EntryId,
    pub points_added: i64,
    pub total_after: i64,
    pub dollar_after: Decimal,
    pub timestamp: Timestamp,
}

impl From<LedgerEntry> for EntryView {
    fn from(entry: LedgerEntry) -> Self {
        EntryView {
            id: entry.id,
            points_added: entry.points_added,
            total_after: entry.total_after,
            dollar_after: points_to_dollars(entry.total_after),
            timestamp: entry.timestamp,
        }
    }
}

/// Full player profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerDetails {
    #[serde(flatten)]
    pub summary: PlayerSummary,
    pub stats: PlayerStats,
    pub pots: PotStats,
    pub history: Vec<EntryView>,
}

impl Ledger {
    /// Summary, ledger statistics, pot totals and history for one player.
    pub async fn player_details(&self, player_id: PlayerId) -> Result<PlayerDetails, LedgerError> {
        let player = self.player(player_id).await?;
        let entries = self.repo.player_entries(player_id).await?;
        let total_pots_bought = self.repo.total_pots_bought(player_id).await?;

        let stats = PlayerStats::from_deltas(entries.iter().map(|e| e.points_added));
        let pots = PotStats {
            total_pots_bought,
            pots_earned: pots_earned(player.running_total),
        };

        Ok(PlayerDetails {
            summary: PlayerSummary::from(&player),
            stats,
            pots,
            history: entries.into_iter().map(EntryView::from).collect(),
        })
    }

    /// Registry-wide totals.
    pub async fn global_stats(&self) -> Result<GlobalStats, LedgerError> {
        Ok(self.repo.global_stats().await?)
    }
}
