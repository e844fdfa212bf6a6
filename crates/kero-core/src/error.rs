//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] kero_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] kero_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] kero_navigation::NavigationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
