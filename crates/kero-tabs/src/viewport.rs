//! The single on-screen surface
//!
//! Exactly one session is bound at a time. The registry is the only caller
//! of `release_session`/`set_session` and always issues them back to back.

use crate::engine::SessionHandle;

pub trait Viewport: Send {
    /// Unbind whatever session is currently shown
    fn release_session(&mut self);

    /// Bind `session` for rendering
    fn set_session(&mut self, session: &SessionHandle);

    /// Replace the address field text
    fn show_address(&mut self, url: &str);

    /// Update the progress indicator and the reload/stop affordance
    fn show_progress(&mut self, percent: u8, loading: bool);

    fn show_title(&mut self, title: &str);

    fn show_tab_count(&mut self, count: usize);

    /// Whether the user is typing in the address field right now
    fn address_has_focus(&self) -> bool;
}
