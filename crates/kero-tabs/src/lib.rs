//! Kero Tab Management
//!
//! Tabs pair one engine session with display state. The registry keeps them
//! ordered, owns the single viewport binding, and the router feeds session
//! events back into the owning tab.

mod engine;
mod registry;
mod router;
mod tab;
mod viewport;

#[cfg(test)]
mod testing;

pub use engine::{
    event_channel, EngineSession, EventSink, RenderEngine, SessionEvent, SessionHandle, TabEvent,
};
pub use registry::{ReloadStop, TabRegistry};
pub use router::EventRouter;
pub use tab::{Tab, TabId, TabSummary, PLACEHOLDER_TITLE};
pub use viewport::Viewport;
