//! Simulated render engine
//!
//! Stands in for a real engine: every load reports progress, the final
//! location and a title derived from the host, on a short delay. Each
//! session keeps its own back/forward list.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use url::Url;

use kero_core::{EngineSession, EventSink, RenderEngine};

const STEP_DELAY: Duration = Duration::from_millis(30);

pub struct HeadlessEngine {
    runtime: Handle,
}

impl HeadlessEngine {
    /// Create the engine runtime. Must be called from within tokio.
    pub fn new() -> Self {
        Self {
            runtime: Handle::current(),
        }
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine for HeadlessEngine {
    fn open_session(&self, events: EventSink) -> Box<dyn EngineSession> {
        tracing::debug!(tab_id = %events.tab_id(), "Opened headless session");
        Box::new(HeadlessSession {
            runtime: self.runtime.clone(),
            events,
            state: Arc::new(Mutex::new(SessionState::default())),
        })
    }
}

#[derive(Default)]
struct SessionState {
    entries: Vec<String>,
    current: Option<usize>,
    load: Option<JoinHandle<()>>,
    /// Bumped whenever the load in flight is superseded or stopped
    generation: u64,
}

impl SessionState {
    fn current_url(&self) -> Option<String> {
        self.current.and_then(|i| self.entries.get(i).cloned())
    }

    fn abort_load(&mut self) -> bool {
        self.generation += 1;
        match self.load.take() {
            Some(task) if !task.is_finished() => {
                task.abort();
                true
            }
            _ => false,
        }
    }
}

struct HeadlessSession {
    runtime: Handle,
    events: EventSink,
    state: Arc<Mutex<SessionState>>,
}

impl HeadlessSession {
    fn start_load(&self, state: &mut SessionState, url: String) {
        state.abort_load();

        let generation = state.generation;
        let shared = Arc::clone(&self.state);
        let events = self.events.clone();
        state.load = Some(self.runtime.spawn(async move {
            if !emit_if_current(&shared, generation, || events.progress(10)) {
                return;
            }
            tokio::time::sleep(STEP_DELAY).await;
            let located = emit_if_current(&shared, generation, || {
                events.location(Some(url.clone()));
                events.progress(60);
            });
            if !located {
                return;
            }
            tokio::time::sleep(STEP_DELAY).await;
            emit_if_current(&shared, generation, || {
                events.title(page_title(&url));
                events.progress(100);
            });
        }));
    }
}

/// Run `emit` only while `generation` is still the session's current load.
///
/// The check and the sends happen under the session lock, so nothing from a
/// stopped or superseded load can follow the events of whatever replaced it.
fn emit_if_current(state: &Mutex<SessionState>, generation: u64, emit: impl FnOnce()) -> bool {
    let state = state.lock();
    if state.generation != generation {
        return false;
    }
    emit();
    true
}

impl EngineSession for HeadlessSession {
    fn load_uri(&self, url: &str) {
        let mut state = self.state.lock();

        // A new load drops the forward list
        let keep = state.current.map(|i| i + 1).unwrap_or(0);
        state.entries.truncate(keep);
        state.entries.push(url.to_string());
        state.current = Some(state.entries.len() - 1);

        self.start_load(&mut state, url.to_string());
    }

    fn go_back(&self) {
        let mut state = self.state.lock();
        match state.current {
            Some(i) if i > 0 => {
                state.current = Some(i - 1);
                let url = state.entries[i - 1].clone();
                self.start_load(&mut state, url);
            }
            _ => tracing::debug!(tab_id = %self.events.tab_id(), "Nothing to go back to"),
        }
    }

    fn go_forward(&self) {
        let mut state = self.state.lock();
        match state.current {
            Some(i) if i + 1 < state.entries.len() => {
                state.current = Some(i + 1);
                let url = state.entries[i + 1].clone();
                self.start_load(&mut state, url);
            }
            _ => tracing::debug!(tab_id = %self.events.tab_id(), "Nothing to go forward to"),
        }
    }

    fn reload(&self) {
        let mut state = self.state.lock();
        if let Some(url) = state.current_url() {
            self.start_load(&mut state, url);
        }
    }

    fn stop(&self) {
        let mut state = self.state.lock();
        if state.abort_load() {
            self.events.progress(100);
        }
    }

    fn close(&self) {
        self.state.lock().abort_load();
    }
}

/// Host name as a stand-in for the document title
fn page_title(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
