//! Main browser state container
//!
//! All tab state lives here and is mutated from one loop: UI commands and
//! session events are both applied through `&mut Browser`, so they can never
//! race on the registry.

use std::sync::Arc;

use kero_navigation::{HistoryEntry, HistoryManager, HistoryRecorder};
use kero_session::{Snapshot, SnapshotStore};
use kero_storage::Database;
use kero_tabs::{
    event_channel, EventRouter, ReloadStop, RenderEngine, TabEvent, TabId, TabRegistry,
    TabSummary, Viewport,
};

use crate::config::Config;
use crate::Result;

/// Main browser instance
pub struct Browser {
    /// Configuration
    config: Config,
    /// Tabs and the viewport binding
    registry: TabRegistry,
    /// Applies session events to tabs, queues history writes
    router: EventRouter,
    /// Tab snapshot persistence
    snapshots: SnapshotStore,
    /// History queries
    history: HistoryManager,
}

impl Browser {
    /// Open the profile database and assemble a browser around `engine`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        config: Config,
        engine: Arc<dyn RenderEngine>,
        viewport: Box<dyn Viewport>,
    ) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;

        Ok(Self::with_database(config, db, engine, viewport))
    }

    /// Assemble a browser on an already open database.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_database(
        config: Config,
        db: Database,
        engine: Arc<dyn RenderEngine>,
        viewport: Box<dyn Viewport>,
    ) -> Self {
        let (events_tx, events_rx) = event_channel();
        let history = HistoryManager::new(db.clone());
        let recorder = HistoryRecorder::spawn(history.clone());

        Self {
            registry: TabRegistry::new(engine, viewport, events_tx, config.home_url.clone()),
            router: EventRouter::new(events_rx, Some(recorder)),
            snapshots: SnapshotStore::new(db),
            history,
            config,
        }
    }

    /// Restore the previous tabs, or open the home page when there are none.
    ///
    /// Returns how many tabs were restored. Calling it again is a no-op.
    pub fn start(&mut self) -> usize {
        if !self.registry.is_empty() {
            return 0;
        }

        let restored = match self.snapshots.restore() {
            Some(snapshot) => self.registry.restore(&snapshot.urls, snapshot.active_index),
            None => 0,
        };

        if self.registry.is_empty() {
            self.registry.create_home_tab();
        }

        tracing::info!(restored, tabs = self.registry.len(), "Browser started");

        restored
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn tab_summaries(&self) -> Vec<TabSummary> {
        self.registry.summaries()
    }

    // === Tab operations ===

    /// Open a tab at the home page and show it
    pub fn new_tab(&mut self) -> TabId {
        self.registry.create_home_tab()
    }

    pub fn open_tab(&mut self, url: &str, activate: bool) -> TabId {
        self.registry.create_tab(url, activate)
    }

    pub fn switch_tab(&mut self, index: usize) {
        self.registry.switch_to(index);
    }

    /// Close a tab and persist the remaining ones
    pub fn close_tab(&mut self, index: usize) {
        if self.registry.close_tab(index) {
            self.save_snapshot();
        }
    }

    // === Navigation operations ===

    /// Load address bar input in the active tab
    pub fn navigate(&mut self, input: &str) -> Option<String> {
        self.registry.load_in_current(input)
    }

    pub fn toggle_reload_stop(&mut self) -> Option<ReloadStop> {
        self.registry.toggle_reload_stop()
    }

    pub fn go_back(&mut self) {
        self.registry.go_back();
    }

    pub fn go_forward(&mut self) {
        self.registry.go_forward();
    }

    // === Events ===

    /// Wait for the next session event
    pub async fn next_event(&mut self) -> Option<TabEvent> {
        self.router.next().await
    }

    pub fn dispatch(&mut self, event: TabEvent) {
        self.router.route(&mut self.registry, event);
    }

    /// Apply all session events queued so far
    pub fn process_pending_events(&mut self) -> usize {
        self.router.drain(&mut self.registry)
    }

    // === Persistence ===

    /// The app is going to the background: persist the open tabs
    pub fn on_background(&self) {
        self.save_snapshot();
    }

    /// Persist the open tabs. Failures are logged, never raised.
    pub fn save_snapshot(&self) -> bool {
        match self.snapshots.save(&Snapshot::capture(&self.registry)) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save tab snapshot");
                false
            }
        }
    }

    // === History ===

    pub fn recent_history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.history.recent(self.config.history_limit)?)
    }

    pub fn clear_history(&self) -> Result<()> {
        Ok(self.history.clear()?)
    }

    /// Persist tabs, close every session and flush pending history writes
    pub async fn shutdown(self) {
        self.save_snapshot();

        let Browser {
            registry, router, ..
        } = self;
        registry.close_all();
        router.shutdown().await;

        tracing::info!("Browser shut down");
    }
}
