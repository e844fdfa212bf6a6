//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Storage error: {0}")]
    Storage(#[from] kero_storage::StorageError),
}
