pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;

pub use auth::{AccessGate, StaticGate, TokenGate};
pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    Decimal, DeltaPolicy, EntryId, LedgerEntry, Player, PlayerId, PotEntryId, SessionDate, Status,
    Timestamp,
};
pub use engine::Ledger;
pub use error::{AppError, LedgerError};
