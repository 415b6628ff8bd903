//! Domain primitives: PlayerId, EntryId, PotEntryId, Timestamp, SessionDate.

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Row id of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl PlayerId {
    pub fn new(id: i64) -> Self {
        PlayerId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row id of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl EntryId {
    pub fn new(id: i64) -> Self {
        EntryId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row id of a pot history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PotEntryId(pub i64);

impl PotEntryId {
    pub fn new(id: i64) -> Self {
        PotEntryId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PotEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creation instant of a ledger or pot history row.
///
/// Stored as fixed-width RFC 3339 text (microseconds, `Z` suffix) so that
/// lexical order in SQLite equals chronological order. Precision is truncated
/// to microseconds on construction so stored and in-memory values compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Timestamp::new(Utc::now())
    }

    pub fn new(at: DateTime<Utc>) -> Self {
        Timestamp(at.trunc_subsecs(6))
    }

    pub fn to_storage_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Parse a stored timestamp.
    ///
    /// # Errors
    /// Returns an error if the text is not RFC 3339.
    pub fn parse_storage(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|dt| Timestamp(dt.with_timezone(&Utc)))
    }

    /// Local calendar date of this instant.
    pub fn local_date(&self) -> SessionDate {
        SessionDate(self.0.with_timezone(&Local).date_naive())
    }
}

/// Calendar date a pot counter row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionDate(pub NaiveDate);

impl SessionDate {
    /// The server's local date right now.
    pub fn today() -> Self {
        SessionDate(Local::now().date_naive())
    }

    pub fn new(date: NaiveDate) -> Self {
        SessionDate(date)
    }

    pub fn to_storage_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Parse a stored `YYYY-MM-DD` date.
    ///
    /// # Errors
    /// Returns an error if the text is not a valid date.
    pub fn parse_storage(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(SessionDate)
    }

    /// Label used for pot history rows created without an explicit session name.
    pub fn default_session_name(&self) -> String {
        format!("Session {}", self.to_storage_string())
    }
}

impl fmt::Display for SessionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_storage_string())
    }
}
