//! Document persistence
//!
//! The persistence collaborator is a key-value document store with simple
//! query-by-field. [`DocumentStore`] is that seam; [`FileStore`] keeps one
//! JSON file per document and [`MemoryStore`] backs tests.
//! [`BundleRepository`] maps bundles onto stored documents.

#[cfg(test)]
pub mod failing;
pub mod file;
pub mod memory;
pub mod repository;

use serde_json::{Map, Value};

use crate::error::Result;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::{BundleRepository, COLLECTION, StoredDocument};

/// Document body: a JSON object
pub type Fields = Map<String, Value>;

/// Key-value document store with query-by-field
///
/// Writes are last-write-wins. There is no locking or versioning.
pub trait DocumentStore: Send + Sync {
    /// Create or replace a document
    fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Fetch a document, `None` when absent
    fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>>;

    /// All documents of a collection, ordered by ID
    fn list(&self, collection: &str) -> Result<Vec<(String, Fields)>>;

    /// Delete every document of a collection, returning how many were removed
    fn delete_all(&self, collection: &str) -> Result<usize>;

    /// Documents whose top-level `field` equals `value`, ordered by ID
    fn query(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<(String, Fields)>> {
        Ok(self
            .list(collection)?
            .into_iter()
            .filter(|(_, fields)| fields.get(field) == Some(value))
            .collect())
    }
}

/// Keys are used as file names by some stores
pub(crate) fn validate_key(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.chars().any(|c| c == '/' || c == '\\' || c.is_control())
}
