//! Record store seam for optional persistence.
//!
//! The editor mirrors every shape and page change into a [`RecordStore`] on a
//! best-effort basis. Store failures are logged by the caller and never undo
//! in-memory state; the editor's own collection stays the source of truth.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shape::{Page, Shape};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store rejected record {id}: {reason}")]
    Rejected { id: Uuid, reason: String },
}

/// A persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "typeName", rename_all = "lowercase")]
pub enum Record {
    Shape(Shape),
    Page(Page),
}

impl Record {
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Shape(s) => s.id,
            Self::Page(p) => p.id,
        }
    }
}

/// Storage backend for shape and page records.
pub trait RecordStore {
    /// Insert or replace records.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the records.
    fn put(&mut self, records: &[Record]) -> Result<(), StoreError>;

    /// Remove records by id. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot remove the records.
    fn remove(&mut self, ids: &[Uuid]) -> Result<(), StoreError>;

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, id: &Uuid) -> Result<Option<Record>, StoreError>;
}

/// In-memory store for hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<Uuid, Record>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn put(&mut self, records: &[Record]) -> Result<(), StoreError> {
        for record in records {
            self.records.insert(record.id(), record.clone());
        }
        Ok(())
    }

    fn remove(&mut self, ids: &[Uuid]) -> Result<(), StoreError> {
        for id in ids {
            self.records.remove(id);
        }
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Option<Record>, StoreError> {
        Ok(self.records.get(id).cloned())
    }
}
