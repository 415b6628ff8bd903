//! Ledger operations over the repository.
//!
//! `Ledger` is the single entry point the HTTP layer talks to. It validates
//! input, stamps time, calls the repository and turns absent rows into
//! `LedgerError::NotFound`. Methods are grouped by concern:
//! - `players.rs` - registration, lookup, removal
//! - `history.rs` - point entries, reversal, history
//! - `pots.rs` - daily pot counters and pot history
//! - `aggregate.rs` - summaries, player details, global statistics

pub mod aggregate;
pub mod history;
pub mod players;
pub mod pots;

pub use aggregate::{EntryView, PlayerDetails, PlayerSummary};

use crate::db::Repository;
use crate::domain::DeltaPolicy;
use std::sync::Arc;

/// Default cap on the pot history listing.
pub const DEFAULT_POT_HISTORY_LIMIT: i64 = 200;

#[derive(Clone)]
pub struct Ledger {
    repo: Arc<Repository>,
    delta_policy: DeltaPolicy,
    pot_history_limit: i64,
}

impl Ledger {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self {
            repo,
            delta_policy: DeltaPolicy::default(),
            pot_history_limit: DEFAULT_POT_HISTORY_LIMIT,
        }
    }

    pub fn with_delta_policy(mut self, delta_policy: DeltaPolicy) -> Self {
        self.delta_policy = delta_policy;
        self
    }

    pub fn with_pot_history_limit(mut self, limit: i64) -> Self {
        self.pot_history_limit = limit.max(1);
        self
    }

    pub fn repo(&self) -> &Arc<Repository> {
        &self.repo
    }
}
