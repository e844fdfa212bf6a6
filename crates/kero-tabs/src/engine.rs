//! Render engine contract
//!
//! The engine is an external collaborator. It is created once by the
//! application and handed to the registry as `Arc<dyn RenderEngine>`.
//! Each opened session reports back through an [`EventSink`] that tags
//! every event with the owning tab's id.

use tokio::sync::mpsc;

use crate::tab::TabId;

/// Process-wide engine runtime.
pub trait RenderEngine: Send + Sync {
    /// Open a new browsing context. `events` is live before this returns,
    /// so nothing the session reports during its first load is lost.
    fn open_session(&self, events: EventSink) -> Box<dyn EngineSession>;
}

/// Navigation primitives of one engine browsing context.
///
/// All calls are fire-and-forget; outcomes arrive later as events.
pub trait EngineSession: Send {
    fn load_uri(&self, url: &str);
    fn go_back(&self);
    fn go_forward(&self);
    fn reload(&self);
    fn stop(&self);
    fn close(&self);
}

/// Something a session reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Load progress in percent, 0..=100
    Progress(u8),
    /// The session's location changed; `None` when the engine has no url
    LocationChange(Option<String>),
    TitleChange(String),
}

/// A [`SessionEvent`] tagged with the tab that owns the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEvent {
    pub tab_id: TabId,
    pub event: SessionEvent,
}

/// Create the channel that carries every session's events to the router.
pub fn event_channel() -> (
    mpsc::UnboundedSender<TabEvent>,
    mpsc::UnboundedReceiver<TabEvent>,
) {
    mpsc::unbounded_channel()
}

/// Sending half handed to one engine session.
///
/// Events sent through one sink arrive in the order they were sent.
#[derive(Debug, Clone)]
pub struct EventSink {
    tab_id: TabId,
    tx: mpsc::UnboundedSender<TabEvent>,
}

impl EventSink {
    pub fn new(tab_id: TabId, tx: mpsc::UnboundedSender<TabEvent>) -> Self {
        Self { tab_id, tx }
    }

    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    pub fn send(&self, event: SessionEvent) {
        let event = TabEvent {
            tab_id: self.tab_id,
            event,
        };

        // The router is gone during shutdown; late events are meaningless then
        if self.tx.send(event).is_err() {
            tracing::trace!(tab_id = %self.tab_id, "Event router closed, event dropped");
        }
    }

    pub fn progress(&self, percent: u8) {
        self.send(SessionEvent::Progress(percent.min(100)));
    }

    pub fn location(&self, url: Option<String>) {
        self.send(SessionEvent::LocationChange(url));
    }

    pub fn title(&self, title: impl Into<String>) {
        self.send(SessionEvent::TitleChange(title.into()));
    }
}

/// A tab's exclusive handle on its engine session.
pub struct SessionHandle {
    tab_id: TabId,
    inner: Box<dyn EngineSession>,
}

impl SessionHandle {
    /// Open a session for `tab_id`, subscribing it to `events` first.
    pub fn open(
        engine: &dyn RenderEngine,
        tab_id: TabId,
        events: mpsc::UnboundedSender<TabEvent>,
    ) -> Self {
        let inner = engine.open_session(EventSink::new(tab_id, events));
        Self { tab_id, inner }
    }

    /// The tab this session belongs to; doubles as the session's identity.
    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    pub fn engine_session(&self) -> &dyn EngineSession {
        self.inner.as_ref()
    }

    pub fn load_uri(&self, url: &str) {
        self.inner.load_uri(url);
    }

    pub fn go_back(&self) {
        self.inner.go_back();
    }

    pub fn go_forward(&self) {
        self.inner.go_forward();
    }

    pub fn reload(&self) {
        self.inner.reload();
    }

    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Close the engine session. Consumes the handle so it cannot be reused.
    pub fn close(self) {
        self.inner.close();
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("tab_id", &self.tab_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_tags_and_orders_events() {
        let (tx, mut rx) = event_channel();
        let tab_id = TabId::new();
        let sink = EventSink::new(tab_id, tx);

        sink.progress(10);
        sink.location(Some("https://example.com".to_string()));
        sink.progress(250);

        let received: Vec<TabEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(
            received,
            vec![
                TabEvent {
                    tab_id,
                    event: SessionEvent::Progress(10)
                },
                TabEvent {
                    tab_id,
                    event: SessionEvent::LocationChange(Some("https://example.com".to_string()))
                },
                // Out of range progress is clamped
                TabEvent {
                    tab_id,
                    event: SessionEvent::Progress(100)
                },
            ]
        );
    }

    #[test]
    fn test_sink_survives_closed_router() {
        let (tx, rx) = event_channel();
        drop(rx);

        let sink = EventSink::new(TabId::new(), tx);
        sink.title("Ignored");
    }
}
