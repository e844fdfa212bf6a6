//! Snapshot Store
//!
//! Keeps the tab snapshot in the settings table. Restoring never fails:
//! a missing, empty or unreadable snapshot just means there is nothing to
//! restore.

use kero_storage::Database;

use crate::snapshot::Snapshot;
use crate::Result;

const SNAPSHOT_KEY: &str = "tab_snapshot";
const LEGACY_URLS_KEY: &str = "tab_urls";
const LEGACY_INDEX_KEY: &str = "current_tab_index";

pub struct SnapshotStore {
    db: Database,
}

impl SnapshotStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Write the snapshot, committed before this returns
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = snapshot.to_json()?;
        self.db.set_setting(SNAPSHOT_KEY, &json)?;

        tracing::debug!(
            tabs = snapshot.urls.len(),
            active_index = snapshot.active_index,
            "Saved tab snapshot"
        );

        Ok(())
    }

    /// The stored snapshot, or `None` when there is nothing usable
    pub fn restore(&self) -> Option<Snapshot> {
        let snapshot = match self.read() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable tab snapshot");
                None
            }
        };

        snapshot.filter(|s| !s.is_empty())
    }

    /// Remove every stored snapshot, legacy keys included
    pub fn clear(&self) -> Result<()> {
        self.db
            .remove_settings(&[SNAPSHOT_KEY, LEGACY_URLS_KEY, LEGACY_INDEX_KEY])?;
        Ok(())
    }

    fn read(&self) -> Result<Option<Snapshot>> {
        if let Some(json) = self.db.get_setting(SNAPSHOT_KEY)? {
            return Ok(Some(Snapshot::from_json(&json)?));
        }

        match self.db.get_setting(LEGACY_URLS_KEY)? {
            Some(urls) => {
                let index = self.db.get_setting_or(LEGACY_INDEX_KEY, "0")?;
                tracing::info!("Importing legacy tab list");
                Ok(Some(Snapshot::from_legacy(&urls, &index)))
            }
            None => Ok(None),
        }
    }
}

impl Clone for SnapshotStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (SnapshotStore, Database) {
        let db = Database::open_in_memory().unwrap();
        (SnapshotStore::new(db.clone()), db)
    }

    #[test]
    fn test_save_then_restore() {
        let (store, _db) = store();
        let snapshot = Snapshot::new(
            vec!["https://a.com".to_string(), "https://b.com".to_string()],
            1,
        );

        store.save(&snapshot).unwrap();
        assert_eq!(store.restore(), Some(snapshot));
    }

    #[test]
    fn test_nothing_saved() {
        let (store, _db) = store();
        assert_eq!(store.restore(), None);
    }

    #[test]
    fn test_empty_snapshot_is_nothing() {
        let (store, _db) = store();
        store.save(&Snapshot::new(Vec::new(), 0)).unwrap();
        assert_eq!(store.restore(), None);
    }

    #[test]
    fn test_malformed_snapshot_is_nothing() {
        let (store, db) = store();
        db.set_setting(SNAPSHOT_KEY, "{not json").unwrap();
        assert_eq!(store.restore(), None);
    }

    #[test]
    fn test_legacy_keys_are_imported() {
        let (store, db) = store();
        db.set_settings(&[
            (LEGACY_URLS_KEY, "https://a.com|https://b.com"),
            (LEGACY_INDEX_KEY, "0"),
        ])
        .unwrap();

        let restored = store.restore().unwrap();
        assert_eq!(restored.urls, vec!["https://a.com", "https://b.com"]);
        assert_eq!(restored.active_index, 0);

        // Newer snapshot wins over legacy keys
        store
            .save(&Snapshot::new(vec!["https://c.com".to_string()], 0))
            .unwrap();
        assert_eq!(store.restore().unwrap().urls, vec!["https://c.com"]);
    }

    #[test]
    fn test_clear() {
        let (store, db) = store();
        db.set_setting(LEGACY_URLS_KEY, "https://a.com").unwrap();
        store
            .save(&Snapshot::new(vec!["https://b.com".to_string()], 0))
            .unwrap();

        store.clear().unwrap();
        assert_eq!(store.restore(), None);
    }
}
