//! Player records and their derived win/loss status.

use super::money::points_to_dollars;
use super::{Decimal, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered player and their running point total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub running_total: i64,
}

impl Player {
    pub fn new(id: PlayerId, name: String, running_total: i64) -> Self {
        Player {
            id,
            name,
            running_total,
        }
    }

    pub fn status(&self) -> Status {
        Status::from_total(self.running_total)
    }

    pub fn dollar_amount(&self) -> Decimal {
        points_to_dollars(self.running_total)
    }
}

/// Whether a player is up, down, or flat overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Won,
    Lost,
    Even,
}

impl Status {
    /// `Won` above zero, `Lost` below, `Even` at exactly zero.
    pub fn from_total(running_total: i64) -> Self {
        match running_total.signum() {
            1 => Status::Won,
            -1 => Status::Lost,
            _ => Status::Even,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Won => write!(f, "WON"),
            Status::Lost => write!(f, "LOST"),
            Status::Even => write!(f, "EVEN"),
        }
    }
}

/// Normalize a requested player name.
///
/// Returns `None` when nothing but whitespace was given.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_from_total() {
        assert_eq!(Status::from_total(1), Status::Won);
        assert_eq!(Status::from_total(-1), Status::Lost);
        assert_eq!(Status::from_total(0), Status::Even);
        assert_eq!(Status::from_total(i64::MIN), Status::Lost);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&Status::Won).unwrap(), "\"WON\"");
        assert_eq!(serde_json::to_string(&Status::Lost).unwrap(), "\"LOST\"");
        assert_eq!(serde_json::to_string(&Status::Even).unwrap(), "\"EVEN\"");
        assert_eq!(Status::Lost.to_string(), "LOST");
    }

    #[test]
    fn test_player_derived_values() {
        let player = Player::new(PlayerId::new(1), "jaya".to_string(), -430);
        assert_eq!(player.status(), Status::Lost);
        assert_eq!(player.dollar_amount(), Decimal::from_str("-2.15").unwrap());
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Alice "), Some("Alice".to_string()));
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name(" \t\n"), None);
    }
}
