//! Document collections and the database that groups them.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::error::StorageError;

/// A named, shared list of JSON documents keyed by id.
///
/// Cloning yields another handle to the same documents.
#[derive(Debug, Clone)]
pub struct Collection {
    name: &'static str,
    documents: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Collection {
    /// Create an empty collection.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            documents: Arc::default(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<(String, Value)>>, StorageError> {
        self.documents
            .lock()
            .map_err(|_| StorageError::Poisoned(self.name))
    }

    /// Append a document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Duplicate`] if `id` is already stored.
    pub fn insert(&self, id: String, document: Value) -> Result<(), StorageError> {
        let mut documents = self.lock()?;
        if documents.iter().any(|(stored, _)| *stored == id) {
            tracing::debug!(collection = self.name, %id, "duplicate insert rejected");
            return Err(StorageError::Duplicate {
                collection: self.name,
                id,
            });
        }
        documents.push((id, document));
        Ok(())
    }

    /// Clone the document stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Poisoned`] if the lock is poisoned.
    pub fn get(&self, id: &str) -> Result<Option<Value>, StorageError> {
        let documents = self.lock()?;
        Ok(documents
            .iter()
            .find(|(stored, _)| stored == id)
            .map(|(_, document)| document.clone()))
    }

    /// Clone every document, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Poisoned`] if the lock is poisoned.
    pub fn all(&self) -> Result<Vec<Value>, StorageError> {
        let documents = self.lock()?;
        Ok(documents.iter().map(|(_, document)| document.clone()).collect())
    }

    /// Replace the document stored under `id`. Returns whether one was found.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Poisoned`] if the lock is poisoned.
    pub fn replace(&self, id: &str, document: Value) -> Result<bool, StorageError> {
        let mut documents = self.lock()?;
        match documents.iter_mut().find(|(stored, _)| stored == id) {
            Some(slot) => {
                slot.1 = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the document stored under `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Poisoned`] if the lock is poisoned.
    pub fn remove(&self, id: &str) -> Result<(), StorageError> {
        self.lock()?.retain(|(stored, _)| stored != id);
        Ok(())
    }
}

/// The `rooms`, `sensors` and `visitors` collections.
#[derive(Debug, Clone)]
pub struct Database {
    rooms: Collection,
    sensors: Collection,
    visitors: Collection,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: Collection::new("rooms"),
            sensors: Collection::new("sensors"),
            visitors: Collection::new("visitors"),
        }
    }

    #[must_use]
    pub fn rooms(&self) -> &Collection {
        &self.rooms
    }

    #[must_use]
    pub fn sensors(&self) -> &Collection {
        &self.sensors
    }

    #[must_use]
    pub fn visitors(&self) -> &Collection {
        &self.visitors
    }
}
