//! Storage-specific error type for the in-memory document store.

use crowdmap_domain::error::CrowdMapError;

/// Errors originating from the in-memory storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A writer panicked while holding the collection lock.
    #[error("collection `{0}` is poisoned")]
    Poisoned(&'static str),

    /// A document with the same id is already stored.
    #[error("collection `{collection}` already holds a document with id `{id}`")]
    Duplicate { collection: &'static str, id: String },
}

impl From<StorageError> for CrowdMapError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
