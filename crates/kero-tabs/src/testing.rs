//! Recording engine and viewport for registry and router tests

use parking_lot::Mutex;
use std::sync::Arc;

use crate::engine::{EngineSession, EventSink, RenderEngine};
use crate::tab::TabId;
use crate::viewport::Viewport;
use crate::SessionHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Open(TabId),
    Load(TabId, String),
    Back(TabId),
    Forward(TabId),
    Reload(TabId),
    Stop(TabId),
    Close(TabId),
}

#[derive(Clone, Default)]
pub struct RecordingEngine {
    pub calls: Arc<Mutex<Vec<EngineCall>>>,
    pub sinks: Arc<Mutex<Vec<EventSink>>>,
}

impl RecordingEngine {
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    pub fn sink(&self, tab_id: TabId) -> EventSink {
        self.sinks
            .lock()
            .iter()
            .find(|s| s.tab_id() == tab_id)
            .cloned()
            .expect("no session opened for tab")
    }
}

struct RecordingSession {
    tab_id: TabId,
    calls: Arc<Mutex<Vec<EngineCall>>>,
}

impl EngineSession for RecordingSession {
    fn load_uri(&self, url: &str) {
        self.calls
            .lock()
            .push(EngineCall::Load(self.tab_id, url.to_string()));
    }

    fn go_back(&self) {
        self.calls.lock().push(EngineCall::Back(self.tab_id));
    }

    fn go_forward(&self) {
        self.calls.lock().push(EngineCall::Forward(self.tab_id));
    }

    fn reload(&self) {
        self.calls.lock().push(EngineCall::Reload(self.tab_id));
    }

    fn stop(&self) {
        self.calls.lock().push(EngineCall::Stop(self.tab_id));
    }

    fn close(&self) {
        self.calls.lock().push(EngineCall::Close(self.tab_id));
    }
}

impl RenderEngine for RecordingEngine {
    fn open_session(&self, events: EventSink) -> Box<dyn EngineSession> {
        let tab_id = events.tab_id();
        self.calls.lock().push(EngineCall::Open(tab_id));
        self.sinks.lock().push(events);
        Box::new(RecordingSession {
            tab_id,
            calls: Arc::clone(&self.calls),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewportCall {
    Release,
    Bind(TabId),
    Address(String),
    Progress(u8, bool),
    Title(String),
    TabCount(usize),
}

#[derive(Debug, Default)]
pub struct ViewportState {
    pub bound: Option<TabId>,
    pub address: String,
    pub has_focus: bool,
    pub calls: Vec<ViewportCall>,
}

#[derive(Clone, Default)]
pub struct RecordingViewport {
    pub state: Arc<Mutex<ViewportState>>,
}

impl RecordingViewport {
    pub fn bound(&self) -> Option<TabId> {
        self.state.lock().bound
    }

    pub fn address(&self) -> String {
        self.state.lock().address.clone()
    }

    pub fn set_focus(&self, focused: bool) {
        self.state.lock().has_focus = focused;
    }

    /// Take the calls recorded so far
    pub fn take_calls(&self) -> Vec<ViewportCall> {
        std::mem::take(&mut self.state.lock().calls)
    }
}

impl Viewport for RecordingViewport {
    fn release_session(&mut self) {
        let mut state = self.state.lock();
        state.bound = None;
        state.calls.push(ViewportCall::Release);
    }

    fn set_session(&mut self, session: &SessionHandle) {
        let mut state = self.state.lock();
        assert!(state.bound.is_none(), "viewport bound to two sessions");
        state.bound = Some(session.tab_id());
        state.calls.push(ViewportCall::Bind(session.tab_id()));
    }

    fn show_address(&mut self, url: &str) {
        let mut state = self.state.lock();
        state.address = url.to_string();
        state.calls.push(ViewportCall::Address(url.to_string()));
    }

    fn show_progress(&mut self, percent: u8, loading: bool) {
        self.state
            .lock()
            .calls
            .push(ViewportCall::Progress(percent, loading));
    }

    fn show_title(&mut self, title: &str) {
        self.state
            .lock()
            .calls
            .push(ViewportCall::Title(title.to_string()));
    }

    fn show_tab_count(&mut self, count: usize) {
        self.state.lock().calls.push(ViewportCall::TabCount(count));
    }

    fn address_has_focus(&self) -> bool {
        self.state.lock().has_focus
    }
}
