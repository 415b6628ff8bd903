//! Domain types for the poker score ledger.
//!
//! This module provides:
//! - Exact dollar arithmetic via the Decimal wrapper and `points_to_dollars`
//! - Primitives: PlayerId, EntryId, PotEntryId, Timestamp, SessionDate
//! - Player, ledger and pot records
//! - Pure statistics derived from ledger deltas

pub mod decimal;
pub mod ledger;
pub mod money;
pub mod player;
pub mod pot;
pub mod primitives;
pub mod stats;

pub use decimal::Decimal;
pub use ledger::{DeltaPolicy, HistoryRecord, LedgerEntry, Reversal};
pub use money::{points_to_dollars, pots_earned};
pub use player::{normalize_name, Player, Status};
pub use pot::{group_by_session, DailyPots, PlayerPots, PotAdded, PotHistoryEntry, PotSession};
pub use primitives::{EntryId, PlayerId, PotEntryId, SessionDate, Timestamp};
pub use stats::{win_rate, GlobalStats, PlayerStats, PotStats};
