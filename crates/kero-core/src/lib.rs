//! Kero Core
//!
//! Wires the tab registry, the event router, snapshot persistence and the
//! history log into one [`Browser`] driven from a single event loop.

mod browser;
mod config;
mod error;

pub use browser::Browser;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use kero_navigation::{resolve_input, HistoryEntry, HistoryManager, MAX_RECENT};
pub use kero_session::{Snapshot, SnapshotStore};
pub use kero_storage::{Database, StorageError};
pub use kero_tabs::{
    EngineSession, EventSink, ReloadStop, RenderEngine, SessionEvent, SessionHandle, Tab, TabEvent,
    TabId, TabSummary, Viewport,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
