//! Tab Registry
//!
//! Ordered tabs plus the one active index. Every public operation leaves at
//! least one tab behind and the viewport bound to `tabs[active]`.

use std::sync::Arc;

use kero_navigation::resolve_input;
use tokio::sync::mpsc;

use crate::engine::{RenderEngine, SessionHandle, TabEvent};
use crate::tab::{Tab, TabId, TabSummary};
use crate::viewport::Viewport;

/// What `toggle_reload_stop` dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadStop {
    Stopped,
    Reloaded,
}

pub struct TabRegistry {
    engine: Arc<dyn RenderEngine>,
    viewport: Box<dyn Viewport>,
    /// Cloned into every session's event sink
    events: mpsc::UnboundedSender<TabEvent>,
    /// Loaded by new tabs and by the replacement for a closed last tab
    home_url: String,
    tabs: Vec<Tab>,
    /// `None` only while `tabs` is empty
    active: Option<usize>,
}

impl TabRegistry {
    pub fn new(
        engine: Arc<dyn RenderEngine>,
        viewport: Box<dyn Viewport>,
        events: mpsc::UnboundedSender<TabEvent>,
        home_url: String,
    ) -> Self {
        Self {
            engine,
            viewport,
            events,
            home_url,
            tabs: Vec::new(),
            active: None,
        }
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn position(&self, tab_id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id() == tab_id)
    }

    /// Current url of every tab, in display order
    pub fn urls(&self) -> Vec<String> {
        self.tabs.iter().map(|t| t.url.clone()).collect()
    }

    pub fn summaries(&self) -> Vec<TabSummary> {
        self.tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| TabSummary {
                index,
                id: tab.id(),
                label: tab.label().to_string(),
                title: tab.title.clone(),
                is_active: self.active == Some(index),
                is_loading: tab.is_loading,
            })
            .collect()
    }

    /// Open a session, append a tab for it and start loading `url`.
    ///
    /// `url` goes through address bar resolution; blank input yields a
    /// blank tab with no load issued. The first tab of an empty registry is
    /// always activated.
    pub fn create_tab(&mut self, url: &str, activate: bool) -> TabId {
        let tab_id = self.push_tab(url);

        if activate || self.active.is_none() {
            self.switch_to(self.tabs.len() - 1);
        } else {
            self.viewport.show_tab_count(self.tabs.len());
        }

        tab_id
    }

    fn push_tab(&mut self, url: &str) -> TabId {
        let tab_id = TabId::new();

        // Subscribed inside open(), before the first load below
        let session = SessionHandle::open(self.engine.as_ref(), tab_id, self.events.clone());
        let resolved = resolve_input(url);
        let tab = Tab::new(session, resolved.clone().unwrap_or_default());

        if let Some(url) = &resolved {
            tab.session().load_uri(url);
        }
        self.tabs.push(tab);

        tracing::info!(
            tab_id = %tab_id,
            url = resolved.as_deref().unwrap_or(""),
            "Created new tab"
        );

        tab_id
    }

    /// Open a tab at the home url and show it
    pub fn create_home_tab(&mut self) -> TabId {
        let home = self.home_url.clone();
        self.create_tab(&home, true)
    }

    /// Bind the viewport to `tabs[index]`. Out of range is a no-op.
    pub fn switch_to(&mut self, index: usize) {
        let Some(tab) = self.tabs.get(index) else {
            return;
        };

        self.viewport.release_session();
        self.viewport.set_session(tab.session());
        self.active = Some(index);

        // Tab fields, not the engine, are the source of truth here
        self.viewport.show_address(&tab.url);
        self.viewport.show_progress(tab.progress, tab.is_loading);
        self.viewport.show_title(&tab.title);
        self.viewport.show_tab_count(self.tabs.len());

        tracing::debug!(tab_id = %tab.id(), index, "Switched tab");
    }

    /// Close `tabs[index]`. Out of range is a no-op and returns false.
    ///
    /// Closing the last remaining tab replaces it with a home tab. Closing a
    /// tab before the active one keeps the same tab active; closing the
    /// active tab activates whichever tab now sits at its position, or the
    /// new last tab when it was last.
    pub fn close_tab(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }

        let was_active = self.active == Some(index);
        if was_active {
            self.viewport.release_session();
        }

        let tab = self.tabs.remove(index);
        let tab_id = tab.id();
        tab.into_session().close();

        tracing::info!(tab_id = %tab_id, index, "Closed tab");

        if self.tabs.is_empty() {
            self.active = None;
            self.create_home_tab();
            return true;
        }

        let current = self.active.unwrap_or(0);
        let next = if index < current {
            current - 1
        } else {
            current.min(self.tabs.len() - 1)
        };

        if was_active || next != current {
            self.switch_to(next);
        } else {
            self.viewport.show_tab_count(self.tabs.len());
        }

        true
    }

    /// Navigate the active tab to resolved address bar input.
    ///
    /// Returns the url loaded, or `None` when the input was blank.
    pub fn load_in_current(&mut self, raw_input: &str) -> Option<String> {
        let url = resolve_input(raw_input)?;
        let index = self.active?;
        let tab = &mut self.tabs[index];

        tab.set_location(url.clone());
        tab.session().load_uri(&url);
        self.viewport.show_address(&url);

        tracing::debug!(tab_id = %tab.id(), url = %url, "Navigating");

        Some(url)
    }

    /// Stop a loading page, reload otherwise. Loading state itself only
    /// changes once progress events arrive.
    pub fn toggle_reload_stop(&mut self) -> Option<ReloadStop> {
        let tab = self.active_tab()?;

        if tab.is_loading {
            tab.session().stop();
            Some(ReloadStop::Stopped)
        } else {
            tab.session().reload();
            Some(ReloadStop::Reloaded)
        }
    }

    /// Always forwarded to the engine, even with nothing to go back to.
    pub fn go_back(&mut self) {
        if let Some(tab) = self.active_tab() {
            tab.session().go_back();
        }
    }

    pub fn go_forward(&mut self) {
        if let Some(tab) = self.active_tab() {
            tab.session().go_forward();
        }
    }

    /// Recreate tabs from stored urls, all in the background, then bind the
    /// viewport once.
    ///
    /// Blank urls are skipped. The tab stored as active is reselected; when
    /// it was blank the closest restored tab before it is, and an index past
    /// the end selects the last tab. Returns how many tabs were created.
    pub fn restore(&mut self, urls: &[String], active_index: usize) -> usize {
        let base = self.tabs.len();
        let mut target = None;

        for (stored, url) in urls.iter().enumerate() {
            if resolve_input(url).is_none() {
                continue;
            }
            self.push_tab(url);
            if stored <= active_index {
                target = Some(self.tabs.len() - 1);
            }
        }

        let restored = self.tabs.len() - base;
        if restored == 0 {
            return 0;
        }

        let target = target.unwrap_or(self.tabs.len() - 1);
        self.switch_to(target);

        tracing::info!(restored, active = target, "Restored tabs");

        restored
    }

    /// Close every session and unbind the viewport. Used at shutdown only.
    pub fn close_all(mut self) {
        self.viewport.release_session();
        for tab in self.tabs.drain(..) {
            tab.into_session().close();
        }
        self.active = None;
    }

    pub(crate) fn tab_mut(&mut self, index: usize) -> Option<&mut Tab> {
        self.tabs.get_mut(index)
    }

    pub(crate) fn viewport_mut(&mut self) -> &mut dyn Viewport {
        self.viewport.as_mut()
    }
}
