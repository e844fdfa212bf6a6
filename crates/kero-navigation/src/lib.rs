//! Kero Navigation
//!
//! Address bar input resolution:
//! 1. Trim; empty input navigates nowhere
//! 2. `scheme://...` and `about:`/`file:`/`javascript:`/`data:` pass through
//! 3. Anything else is treated as a host and gets `https://`
//!
//! Also owns the visit history log and its background writer.

mod error;
mod history;
mod input;
mod recorder;

pub use error::NavigationError;
pub use history::{should_record, HistoryEntry, HistoryManager, MAX_RECENT};
pub use input::resolve_input;
pub use recorder::HistoryRecorder;

pub type Result<T> = std::result::Result<T, NavigationError>;
