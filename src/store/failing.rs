//! Store double whose writes fail for chosen document IDs

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{DocumentStore, Fields, MemoryStore};
use crate::error::{Result, store};

/// Reason reported for every refused write
pub const REFUSED: &str = "disk quota exceeded";

/// Delegates to a [`MemoryStore`] but refuses `set` for the listed IDs
pub struct FailingStore {
    inner: Arc<MemoryStore>,
    refused: BTreeSet<String>,
}

impl FailingStore {
    pub fn new(inner: Arc<MemoryStore>, refused: &[&str]) -> Self {
        Self {
            inner,
            refused: refused.iter().map(ToString::to_string).collect(),
        }
    }
}

impl DocumentStore for FailingStore {
    fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        if self.refused.contains(id) {
            return Err(store::write_failed(id, REFUSED));
        }
        self.inner.set(collection, id, fields)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>> {
        self.inner.get(collection, id)
    }

    fn list(&self, collection: &str) -> Result<Vec<(String, Fields)>> {
        self.inner.list(collection)
    }

    fn delete_all(&self, collection: &str) -> Result<usize> {
        self.inner.delete_all(collection)
    }
}
