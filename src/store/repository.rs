//! Bundle persistence on top of a [`DocumentStore`]

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DocumentStore, Fields};
use crate::domain::{Bundle, ImagePayload, bundle::validate_bundle_id};
use crate::error::{AdBundleError, Result, bundle, store};
use crate::package;

/// Collection holding converted bundles
pub const COLLECTION: &str = "convertedHtml";

/// Field bundles are grouped by
const SESSION_FIELD: &str = "sessionId";

/// Persisted form of a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub session_id: String,
    pub filename: String,
    pub html_base64: String,
    #[serde(default)]
    pub css_base64: String,
    #[serde(default)]
    pub image_base64s: BTreeMap<String, String>,
    #[serde(default)]
    pub zip_base64: String,
    pub created_at: String,
}

impl StoredDocument {
    /// Encode a bundle, assembling its package at store time
    pub fn from_bundle(bundle: &Bundle) -> Result<Self> {
        let archive = package::assemble(bundle)?;
        Ok(Self {
            session_id: bundle.session_id.clone(),
            filename: bundle.id.clone(),
            html_base64: STANDARD.encode(&bundle.html),
            css_base64: STANDARD.encode(&bundle.css),
            image_base64s: bundle
                .images
                .iter()
                .map(|(name, payload)| (name.clone(), payload.as_base64().to_string()))
                .collect(),
            zip_base64: STANDARD.encode(archive),
            created_at: bundle
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    /// Decode back into a bundle stored under `id`
    pub fn into_bundle(self, id: &str) -> Result<Bundle> {
        let html = decode_text(id, "htmlBase64", &self.html_base64)?;
        let css = decode_text(id, "cssBase64", &self.css_base64)?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| store::corrupt(id, format!("createdAt: {e}")))?
            .with_timezone(&Utc);

        Ok(Bundle {
            id: id.to_string(),
            session_id: self.session_id,
            html,
            css,
            images: self
                .image_base64s
                .into_iter()
                .map(|(name, encoded)| (name, ImagePayload::from_base64(encoded)))
                .collect(),
            created_at,
        })
    }

    fn into_fields(self, id: &str) -> Result<Fields> {
        match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(_) => Err(store::write_failed(id, "document did not serialize to an object")),
            Err(e) => Err(store::write_failed(id, e.to_string())),
        }
    }

    fn from_fields(id: &str, fields: Fields) -> Result<Self> {
        serde_json::from_value(Value::Object(fields)).map_err(|e| store::corrupt(id, e.to_string()))
    }
}

fn decode_text(id: &str, field: &str, encoded: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| store::corrupt(id, format!("{field}: {e}")))?;
    String::from_utf8(bytes).map_err(|e| store::corrupt(id, format!("{field}: {e}")))
}

/// Bundles persisted in the `convertedHtml` collection
#[derive(Clone)]
pub struct BundleRepository {
    store: Arc<dyn DocumentStore>,
}

impl BundleRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Persist a bundle under its ID, replacing any earlier version
    pub fn store(&self, bundle: &Bundle) -> Result<StoredDocument> {
        let document = StoredDocument::from_bundle(bundle)?;
        self.put(document.clone())?;
        Ok(document)
    }

    /// Persist an already encoded document under its `filename`
    pub fn put(&self, document: StoredDocument) -> Result<()> {
        let id = document.filename.clone();
        validate_bundle_id(&id)?;
        let fields = document.into_fields(&id)?;
        self.store.set(COLLECTION, &id, fields)
    }

    /// Stored document for `id`, or `NotFound`
    pub fn document(&self, id: &str) -> Result<StoredDocument> {
        validate_bundle_id(id)?;
        match self.store.get(COLLECTION, id)? {
            Some(fields) => StoredDocument::from_fields(id, fields),
            None => Err(bundle::not_found(id)),
        }
    }

    /// Load a bundle, or `NotFound`
    pub fn load(&self, id: &str) -> Result<Bundle> {
        self.document(id)?.into_bundle(id)
    }

    /// Load a bundle if it exists
    pub fn find(&self, id: &str) -> Result<Option<Bundle>> {
        match self.load(id) {
            Ok(bundle) => Ok(Some(bundle)),
            Err(AdBundleError::BundleNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Stored documents of one session, ordered by ID
    pub fn session_documents(&self, session_id: &str) -> Result<Vec<(String, StoredDocument)>> {
        self.store
            .query(COLLECTION, SESSION_FIELD, &Value::from(session_id))?
            .into_iter()
            .map(|(id, fields)| Ok((id.clone(), StoredDocument::from_fields(&id, fields)?)))
            .collect()
    }

    /// Bundles, optionally restricted to one session, sorted by folder then name
    pub fn list(&self, session_id: Option<&str>) -> Result<Vec<Bundle>> {
        let documents = match session_id {
            Some(session) => self
                .store
                .query(COLLECTION, SESSION_FIELD, &Value::from(session))?,
            None => self.store.list(COLLECTION)?,
        };

        let mut bundles = documents
            .into_iter()
            .map(|(id, fields)| StoredDocument::from_fields(&id, fields)?.into_bundle(&id))
            .collect::<Result<Vec<_>>>()?;
        bundles.sort_by(|a, b| {
            a.folder()
                .cmp(b.folder())
                .then_with(|| a.display_name().cmp(b.display_name()))
        });
        Ok(bundles)
    }

    /// Replace a bundle's HTML wholesale and re-assemble its package
    pub fn replace_html(&self, id: &str, html: &str) -> Result<Bundle> {
        let mut bundle = self.load(id)?;
        bundle.html = html.to_string();
        self.store(&bundle)?;
        Ok(bundle)
    }

    /// Delete every stored bundle
    pub fn clear(&self) -> Result<usize> {
        self.store.delete_all(COLLECTION)
    }
}
