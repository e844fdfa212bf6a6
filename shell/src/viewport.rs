//! Terminal viewport
//!
//! Prints what a windowed shell would draw. There is no address field to
//! type into while events arrive, so it never reports focus.

use kero_core::{SessionHandle, Viewport};

#[derive(Default)]
pub struct TerminalViewport {
    loading: bool,
}

impl TerminalViewport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Viewport for TerminalViewport {
    fn release_session(&mut self) {
        self.loading = false;
    }

    fn set_session(&mut self, session: &SessionHandle) {
        tracing::debug!(tab_id = %session.tab_id(), "Viewport bound");
    }

    fn show_address(&mut self, url: &str) {
        println!("  address  {url}");
    }

    fn show_progress(&mut self, percent: u8, loading: bool) {
        // Only the edges of a load are worth a line
        if loading != self.loading {
            if loading {
                println!("  loading  {percent}%");
            } else {
                println!("  loaded");
            }
            self.loading = loading;
        }
    }

    fn show_title(&mut self, title: &str) {
        println!("  title    {title}");
    }

    fn show_tab_count(&mut self, count: usize) {
        println!("  tabs     {count}");
    }

    fn address_has_focus(&self) -> bool {
        false
    }
}
