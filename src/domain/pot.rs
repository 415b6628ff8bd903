//! Pot counters (resettable per day) and the permanent pot history.

use super::{PlayerId, PotEntryId, SessionDate, Timestamp};
use serde::{Deserialize, Serialize};

/// One buy-in recorded in the permanent pot history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotHistoryEntry {
    pub id: PotEntryId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub pot_count: i64,
    pub session_date: SessionDate,
    pub timestamp: Timestamp,
    pub session_name: String,
}

/// Result of a pot addition: the day's counter and the history row written with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAdded {
    pub pot_count: i64,
    pub history: PotHistoryEntry,
}

/// A player's counter for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPots {
    pub player_id: PlayerId,
    pub player_name: String,
    pub pot_count: i64,
}

/// Every player's counter for one day plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPots {
    pub session_date: SessionDate,
    pub players: Vec<PlayerPots>,
    pub total: i64,
}

impl DailyPots {
    pub fn new(session_date: SessionDate, players: Vec<PlayerPots>) -> Self {
        let total = players.iter().map(|p| p.pot_count).sum();
        DailyPots {
            session_date,
            players,
            total,
        }
    }
}

/// Pot history entries sharing a session date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotSession {
    pub session_date: SessionDate,
    pub total: i64,
    pub entries: Vec<PotHistoryEntry>,
}

/// Group entries by session date, keeping the order in which each date first appears.
pub fn group_by_session(entries: Vec<PotHistoryEntry>) -> Vec<PotSession> {
    let mut sessions: Vec<PotSession> = Vec::new();
    for entry in entries {
        let date = entry.session_date;
        let idx = match sessions.iter().position(|s| s.session_date == date) {
            Some(idx) => idx,
            None => {
                sessions.push(PotSession {
                    session_date: date,
                    total: 0,
                    entries: Vec::new(),
                });
                sessions.len() - 1
            }
        };
        let session = &mut sessions[idx];
        session.total += entry.pot_count;
        session.entries.push(entry);
    }
    sessions
}
