//! Kero Storage Layer
//!
//! SQLite-backed profile database: the settings key-value table that holds
//! the tab snapshot, and the visit history log.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
