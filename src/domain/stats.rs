//! Derived statistics over ledger deltas and player totals.

use super::money::points_to_dollars;
use super::Decimal;
use serde::{Deserialize, Serialize};

/// Win/loss statistics over one player's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_games: i64,
    pub total_wins: i64,
    pub total_losses: i64,
    pub biggest_win: i64,
    pub biggest_loss: i64,
    /// Percentage of entries that were wins, one decimal place.
    pub win_rate: Decimal,
}

impl PlayerStats {
    pub fn from_deltas<I>(deltas: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut stats = PlayerStats {
            total_games: 0,
            total_wins: 0,
            total_losses: 0,
            biggest_win: 0,
            biggest_loss: 0,
            win_rate: Decimal::zero(),
        };

        for delta in deltas {
            stats.total_games += 1;
            if delta > 0 {
                stats.total_wins += 1;
            } else if delta < 0 {
                stats.total_losses += 1;
            }
            stats.biggest_win = stats.biggest_win.max(delta);
            stats.biggest_loss = stats.biggest_loss.min(delta);
        }

        stats.win_rate = win_rate(stats.total_wins, stats.total_games);
        stats
    }
}

/// `round(wins / games * 100, 1)`, or zero when there are no games.
pub fn win_rate(wins: i64, games: i64) -> Decimal {
    if games == 0 {
        return Decimal::zero();
    }
    (Decimal::ratio(wins, games) * Decimal::hundred()).round_half_even(1)
}

/// Pot figures for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotStats {
    pub total_pots_bought: i64,
    /// Whole 1000-point units in the running total, floored (negative when down).
    pub pots_earned: i64,
}

/// Registry-wide totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_players: i64,
    pub total_transactions: i64,
    pub total_points: i64,
    pub total_dollars: Decimal,
    pub winners: i64,
    pub losers: i64,
    pub even: i64,
}

impl GlobalStats {
    pub fn new(
        total_players: i64,
        total_transactions: i64,
        total_points: i64,
        winners: i64,
        losers: i64,
    ) -> Self {
        GlobalStats {
            total_players,
            total_transactions,
            total_points,
            total_dollars: points_to_dollars(total_points),
            winners,
            losers,
            even: total_players - winners - losers,
        }
    }
}
