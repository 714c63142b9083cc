//! File-backed document store
//!
//! Layout: `<root>/<collection>/<id>.json`. Writes go through a temporary file
//! in the same directory and are renamed into place.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use super::{DocumentStore, Fields, validate_key};
use crate::error::{Result, store};

const DOCUMENT_EXTENSION: &str = ".json";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at `data_dir/namespace`
    pub fn open(data_dir: &Path, namespace: &str) -> Result<Self> {
        if !validate_key(namespace) {
            return Err(store::operation_failed(format!(
                "Invalid store namespace '{namespace}'"
            )));
        }
        Ok(Self {
            root: data_dir.join(namespace),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf> {
        if !validate_key(collection) {
            return Err(store::operation_failed(format!(
                "Invalid collection name '{collection}'"
            )));
        }
        Ok(self.root.join(collection))
    }

    fn document_path(&self, collection: &str, id: &str) -> Result<PathBuf> {
        if !validate_key(id) {
            return Err(store::operation_failed(format!("Invalid document key '{id}'")));
        }
        Ok(self
            .collection_dir(collection)?
            .join(format!("{id}{DOCUMENT_EXTENSION}")))
    }

    fn read_document(path: &Path, id: &str) -> Result<Option<Fields>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store::read_failed(id, e.to_string())),
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(fields)) => Ok(Some(fields)),
            Ok(_) => Err(store::corrupt(id, "document is not a JSON object")),
            Err(e) => Err(store::corrupt(id, e.to_string())),
        }
    }

    fn document_files(&self, collection: &str) -> Result<Vec<(String, PathBuf)>> {
        let dir = self.collection_dir(collection)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| store::operation_failed(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_suffix(DOCUMENT_EXTENSION))
            else {
                continue;
            };
            files.push((id.to_string(), entry.into_path()));
        }
        Ok(files)
    }
}

impl DocumentStore for FileStore {
    fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let path = self.document_path(collection, id)?;
        let dir = self.collection_dir(collection)?;
        fs::create_dir_all(&dir).map_err(|e| store::write_failed(id, e.to_string()))?;

        let content = serde_json::to_vec_pretty(&Value::Object(fields))
            .map_err(|e| store::write_failed(id, e.to_string()))?;

        let mut temp =
            NamedTempFile::new_in(&dir).map_err(|e| store::write_failed(id, e.to_string()))?;
        temp.write_all(&content)
            .map_err(|e| store::write_failed(id, e.to_string()))?;
        temp.persist(&path)
            .map_err(|e| store::write_failed(id, e.error.to_string()))?;
        Ok(())
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>> {
        let path = self.document_path(collection, id)?;
        Self::read_document(&path, id)
    }

    fn list(&self, collection: &str) -> Result<Vec<(String, Fields)>> {
        let mut documents = Vec::new();
        for (id, path) in self.document_files(collection)? {
            // Removed between listing and reading
            if let Some(fields) = Self::read_document(&path, &id)? {
                documents.push((id, fields));
            }
        }
        Ok(documents)
    }

    fn delete_all(&self, collection: &str) -> Result<usize> {
        let mut removed = 0;
        for (id, path) in self.document_files(collection)? {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(store::write_failed(id, e.to_string())),
            }
        }
        Ok(removed)
    }
}
