//! In-memory document store

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{DocumentStore, Fields, validate_key};
use crate::error::{Result, store};

type Collections = BTreeMap<String, BTreeMap<String, Fields>>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>> {
        self.collections
            .lock()
            .map_err(|_| store::operation_failed("memory store lock poisoned"))
    }
}

impl DocumentStore for MemoryStore {
    fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        if !validate_key(id) {
            return Err(store::write_failed(id, "invalid document key"));
        }
        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>> {
        Ok(self
            .lock()?
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn list(&self, collection: &str) -> Result<Vec<(String, Fields)>> {
        Ok(self
            .lock()?
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| (id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn delete_all(&self, collection: &str) -> Result<usize> {
        Ok(self
            .lock()?
            .remove(collection)
            .map_or(0, |docs| docs.len()))
    }
}
