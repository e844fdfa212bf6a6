//! Kero Session Persistence
//!
//! - The open tabs are saved as a snapshot: ordered urls plus active index
//! - Saved whenever the app goes to the background and after closing a tab
//! - Read once at startup; anything unreadable means "start fresh"

mod error;
mod snapshot;
mod store;

pub use error::SessionError;
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use store::SnapshotStore;

pub type Result<T> = std::result::Result<T, SessionError>;
