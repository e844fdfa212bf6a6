//! Event Router
//!
//! Applies session events to the tab that owns them, looked up by id at
//! delivery time. Only the active tab's events reach the viewport. A tab
//! closed while its events were in flight simply drops them.

use tokio::sync::mpsc;

use kero_navigation::{should_record, HistoryRecorder};

use crate::engine::{SessionEvent, TabEvent};
use crate::registry::TabRegistry;

pub struct EventRouter {
    events: mpsc::UnboundedReceiver<TabEvent>,
    history: Option<HistoryRecorder>,
}

impl EventRouter {
    pub fn new(
        events: mpsc::UnboundedReceiver<TabEvent>,
        history: Option<HistoryRecorder>,
    ) -> Self {
        Self { events, history }
    }

    /// Wait for the next event from any session.
    pub async fn next(&mut self) -> Option<TabEvent> {
        self.events.recv().await
    }

    /// Apply every event already queued. Returns how many were applied.
    pub fn drain(&mut self, registry: &mut TabRegistry) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.route(registry, event);
            applied += 1;
        }
        applied
    }

    pub fn route(&self, registry: &mut TabRegistry, event: TabEvent) {
        let TabEvent { tab_id, event } = event;

        let Some(index) = registry.position(tab_id) else {
            tracing::debug!(tab_id = %tab_id, ?event, "Dropping event for closed tab");
            return;
        };
        let is_active = registry.active_index() == Some(index);

        match event {
            SessionEvent::Progress(percent) => {
                let Some(tab) = registry.tab_mut(index) else {
                    return;
                };
                tab.apply_progress(percent);
                let (progress, loading) = (tab.progress, tab.is_loading);

                if is_active {
                    registry.viewport_mut().show_progress(progress, loading);
                }
            }
            SessionEvent::LocationChange(None) => {}
            SessionEvent::LocationChange(Some(url)) => {
                let Some(tab) = registry.tab_mut(index) else {
                    return;
                };
                tab.set_location(url.clone());

                tracing::debug!(
                    tab_id = %tab_id,
                    url = %url,
                    active = is_active,
                    "Location changed"
                );

                if is_active {
                    let viewport = registry.viewport_mut();
                    // Never overwrite what the user is typing
                    if !viewport.address_has_focus() {
                        viewport.show_address(&url);
                    }
                }

                if should_record(&url) {
                    if let Some(history) = &self.history {
                        // Title arrives later and is patched in by retitle()
                        history.record("", &url);
                    }
                }
            }
            SessionEvent::TitleChange(title) => {
                let Some(tab) = registry.tab_mut(index) else {
                    return;
                };
                tab.set_title(title);
                let title = tab.title.clone();
                let url = tab.url.clone();

                if is_active {
                    registry.viewport_mut().show_title(&title);
                }

                if should_record(&url) {
                    if let Some(history) = &self.history {
                        history.retitle(&url, &title);
                    }
                }
            }
        }
    }

    /// Stop the history writer after it has flushed queued visits.
    pub async fn shutdown(self) {
        if let Some(history) = self.history {
            history.shutdown().await;
        }
    }
}
