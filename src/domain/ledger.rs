//! Ledger entries: one point delta each, with a snapshot of the resulting total.

use super::{EntryId, PlayerId, Timestamp};
use serde::{Deserialize, Serialize};

/// One recorded point delta.
///
/// `total_after` is the player's running total right after this entry was
/// appended. It is never rewritten, even when an earlier entry is reversed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub player_id: PlayerId,
    pub points_added: i64,
    pub total_after: i64,
    pub timestamp: Timestamp,
}

/// A ledger entry joined with its player's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: EntryId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub points_added: i64,
    pub total_after: i64,
    pub timestamp: Timestamp,
}

/// What a reversal removed and where it left the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reversal {
    pub entry_id: EntryId,
    pub player_id: PlayerId,
    pub points_removed: i64,
    pub new_total: i64,
}

/// How zero-point additions are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaPolicy {
    /// A zero delta is a validation failure.
    #[default]
    RejectZero,
    /// A zero delta is recorded like any other entry.
    AllowZero,
}

impl DeltaPolicy {
    pub fn permits(&self, delta: i64) -> bool {
        match self {
            DeltaPolicy::RejectZero => delta != 0,
            DeltaPolicy::AllowZero => true,
        }
    }
}
