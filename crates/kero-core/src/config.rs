//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use kero_navigation::{resolve_input, MAX_RECENT};

use crate::error::CoreError;
use crate::Result;

pub const DEFAULT_HOME_URL: &str = "https://bing.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Loaded by new tabs and when the last tab is closed
    pub home_url: String,
    /// How many entries a history listing returns (at most 50)
    pub history_limit: usize,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("kero.db"),
            home_url: DEFAULT_HOME_URL.to_string(),
            history_limit: MAX_RECENT,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Kero"))
            .unwrap_or_else(|| PathBuf::from(".kero"))
    }

    /// Override the home page; the value goes through address bar resolution
    pub fn with_home_url(mut self, home_url: &str) -> Result<Self> {
        self.home_url = resolve_input(home_url)
            .ok_or_else(|| CoreError::Config("Home URL cannot be empty".to_string()))?;
        Ok(self)
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.min(MAX_RECENT);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Platform data directory lookup
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/kero-test"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/kero-test/kero.db"));
        assert_eq!(config.home_url, DEFAULT_HOME_URL);
        assert_eq!(config.history_limit, MAX_RECENT);
    }

    #[test]
    fn test_overrides() {
        let config = Config::new(PathBuf::from("/tmp/kero-test"))
            .with_home_url(" duckduckgo.com ")
            .unwrap()
            .with_history_limit(500);

        assert_eq!(config.home_url, "https://duckduckgo.com");
        assert_eq!(config.history_limit, MAX_RECENT);

        assert!(Config::new(PathBuf::from("/tmp/kero-test"))
            .with_home_url("   ")
            .is_err());
    }
}
