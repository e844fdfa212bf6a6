//! Tab data structure
//!
//! A tab pairs one engine session with what the UI shows for it:
//! - Url (empty for a blank tab)
//! - Title (placeholder until the page reports one)
//! - Loading indicator

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::SessionHandle;

/// Title shown until a page reports its own.
pub const PLACEHOLDER_TITLE: &str = "New Tab";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(Uuid);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct Tab {
    /// Stable identifier, also carried by every event of the session
    id: TabId,
    /// Owned for the tab's whole lifetime, never swapped
    session: SessionHandle,
    /// Last known location
    pub url: String,
    /// Page title
    pub title: String,
    /// True while progress is below 100
    pub is_loading: bool,
    /// Last reported progress in percent
    pub progress: u8,
}

impl Tab {
    pub fn new(session: SessionHandle, url: String) -> Self {
        Self {
            id: session.tab_id(),
            session,
            url,
            title: PLACEHOLDER_TITLE.to_string(),
            is_loading: false,
            progress: 0,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub(crate) fn into_session(self) -> SessionHandle {
        self.session
    }

    pub fn apply_progress(&mut self, percent: u8) {
        self.progress = percent.min(100);
        self.is_loading = self.progress < 100;
    }

    /// Update url (navigation or engine report)
    pub fn set_location(&mut self, url: String) {
        self.url = url;
    }

    /// Update page title; blank titles fall back to the placeholder
    pub fn set_title(&mut self, title: String) {
        if title.trim().is_empty() {
            self.title = PLACEHOLDER_TITLE.to_string();
        } else {
            self.title = title;
        }
    }

    pub fn is_blank(&self) -> bool {
        self.url.is_empty()
    }

    /// Label for the tab switcher: the url, or the placeholder for blank tabs
    pub fn label(&self) -> &str {
        if self.url.is_empty() {
            PLACEHOLDER_TITLE
        } else {
            &self.url
        }
    }
}

/// Read-only view of a tab for listing in a switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSummary {
    pub index: usize,
    pub id: TabId,
    pub label: String,
    pub title: String,
    pub is_active: bool,
    pub is_loading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{event_channel, EngineSession, EventSink, RenderEngine};

    struct InertSession;

    impl EngineSession for InertSession {
        fn load_uri(&self, _url: &str) {}
        fn go_back(&self) {}
        fn go_forward(&self) {}
        fn reload(&self) {}
        fn stop(&self) {}
        fn close(&self) {}
    }

    struct InertEngine;

    impl RenderEngine for InertEngine {
        fn open_session(&self, _events: EventSink) -> Box<dyn EngineSession> {
            Box::new(InertSession)
        }
    }

    fn tab(url: &str) -> Tab {
        let (tx, _rx) = event_channel();
        let session = SessionHandle::open(&InertEngine, TabId::new(), tx);
        Tab::new(session, url.to_string())
    }

    #[test]
    fn test_new_tab() {
        let tab = tab("https://example.com");
        assert_eq!(tab.url, "https://example.com");
        assert_eq!(tab.title, PLACEHOLDER_TITLE);
        assert!(!tab.is_loading);
        assert_eq!(tab.id(), tab.session().tab_id());
    }

    #[test]
    fn test_progress_drives_loading() {
        let mut tab = tab("https://example.com");

        tab.apply_progress(0);
        assert!(tab.is_loading);
        tab.apply_progress(99);
        assert!(tab.is_loading);
        tab.apply_progress(100);
        assert!(!tab.is_loading);
        tab.apply_progress(40);
        assert!(tab.is_loading);
    }

    #[test]
    fn test_title_and_label_fallbacks() {
        let mut tab = tab("");
        assert!(tab.is_blank());
        assert_eq!(tab.label(), PLACEHOLDER_TITLE);

        tab.set_location("https://example.com/".to_string());
        assert_eq!(tab.label(), "https://example.com/");

        tab.set_title("Example Domain".to_string());
        assert_eq!(tab.title, "Example Domain");
        tab.set_title("   ".to_string());
        assert_eq!(tab.title, PLACEHOLDER_TITLE);
    }
}
