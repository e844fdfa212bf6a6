//! Snapshot record

use serde::{Deserialize, Serialize};

use kero_tabs::TabRegistry;

use crate::error::SessionError;
use crate::Result;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted form of the open tabs.
///
/// Encoded as JSON, so urls round-trip whatever characters they contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    /// Tab urls in display order
    pub urls: Vec<String>,
    pub active_index: usize,
}

impl Snapshot {
    pub fn new(urls: Vec<String>, active_index: usize) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            urls,
            active_index,
        }
    }

    /// Capture the registry as it is right now
    pub fn capture(registry: &TabRegistry) -> Self {
        Self::new(registry.urls(), registry.active_index().unwrap_or(0))
    }

    pub fn is_empty(&self) -> bool {
        self.urls.iter().all(|u| u.trim().is_empty())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SessionError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }

    /// Read the older `a|b|c` format. Urls containing `|` were already lost
    /// when that format was written, so nothing better can be done here.
    pub fn from_legacy(urls: &str, active_index: &str) -> Self {
        let urls = urls
            .split('|')
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect();
        let active_index = active_index.trim().parse().unwrap_or(0);

        Self::new(urls, active_index)
    }
}
