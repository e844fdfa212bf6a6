//! History management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::Result;
use kero_storage::Database;

/// Upper bound on entries returned by [`HistoryManager::recent`].
pub const MAX_RECENT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub visited_at: DateTime<Utc>,
}

/// Whether a location is worth a history entry.
///
/// Only locations that parse as URLs count, and `about:` pages never do.
pub fn should_record(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.scheme() != "about",
        Err(_) => false,
    }
}

pub struct HistoryManager {
    db: Database,
}

impl HistoryManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Append a visit stamped with the current time
    pub fn record_visit(&self, title: &str, url: &str) -> Result<()> {
        self.append(title, url, Utc::now())
    }

    /// Append a visit; the log keeps every visit, repeats included
    pub fn append(&self, title: &str, url: &str, visited_at: DateTime<Utc>) -> Result<()> {
        Ok(self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO history (title, url, visited_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![title, url, visited_at.timestamp_millis()],
            )?;
            Ok(())
        })?)
    }

    /// Set the title of the newest visit to `url`, once the page reports it.
    pub fn update_title(&self, url: &str, title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Ok(());
        }

        Ok(self.db.with_connection(|conn| {
            conn.execute(
                "UPDATE history SET title = ?1
                 WHERE id = (SELECT MAX(id) FROM history WHERE url = ?2)",
                rusqlite::params![title, url],
            )?;
            Ok(())
        })?)
    }

    /// Most recent visits first, never more than [`MAX_RECENT`]
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let limit = limit.min(MAX_RECENT);

        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, url, visited_at FROM history
                 ORDER BY visited_at DESC, id DESC
                 LIMIT ?1",
            )?;

            let entries: Vec<HistoryEntry> = stmt
                .query_map([limit as i64], |row| {
                    let visited_ms: i64 = row.get(3)?;
                    let visited_at = DateTime::from_timestamp_millis(visited_ms)
                        .unwrap_or_default();

                    Ok(HistoryEntry {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        url: row.get(2)?,
                        visited_at,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            Ok(entries)
        })?)
    }

    /// Clear all history
    pub fn clear(&self) -> Result<()> {
        Ok(self.db.with_connection(|conn| {
            conn.execute("DELETE FROM history", [])?;
            Ok(())
        })?)
    }
}

impl Clone for HistoryManager {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
