//! Bundle domain types
//!
//! A bundle is the normalized, storable unit derived from one converted source
//! file: its HTML, optional stylesheet and named image payloads.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};

use crate::error::{Result, package, request};

/// Characters that may not appear in a stored bundle name
const FORBIDDEN_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Source extension replaced by `.html` when deriving a bundle ID
const SOURCE_EXTENSION: &str = ".psd";

/// Extension every bundle ID ends with
const HTML_EXTENSION: &str = ".html";

/// A base64-encoded image payload as delivered by the converter.
///
/// Payloads stay encoded until something needs the bytes, so an undecodable
/// payload surfaces where it is used (packaging, inlining) with the image
/// name attached instead of failing the whole conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload(String);

impl ImagePayload {
    pub fn from_base64(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes))
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// Decode the payload, naming `image` in the error
    pub fn decode(&self, image: &str) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.0.trim())
            .map_err(|e| package::image_invalid(image, e.to_string()))
    }
}

/// Normalized HTML + CSS + images unit derived from one converted source file
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub id: String,
    pub session_id: String,
    pub html: String,
    pub css: String,
    pub images: BTreeMap<String, ImagePayload>,
    pub created_at: DateTime<Utc>,
}

impl Bundle {
    /// Logical folder the bundle is grouped under (its session)
    pub fn folder(&self) -> &str {
        &self.session_id
    }

    /// Bundle ID without the session prefix, e.g. `banner1.html`
    pub fn display_name(&self) -> &str {
        display_name(&self.id, &self.session_id)
    }

    /// File stem used when offering the package for download
    pub fn package_stem(&self) -> &str {
        self.id.strip_suffix(HTML_EXTENSION).unwrap_or(&self.id)
    }

    pub fn has_stylesheet(&self) -> bool {
        !self.css.is_empty()
    }
}

/// Strip the `<session>_` prefix from a bundle ID when present
pub fn display_name<'a>(id: &'a str, session_id: &str) -> &'a str {
    id.strip_prefix(session_id)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(id)
}

/// Reduce a converter source name to a safe `.html` file name.
///
/// Directory components are dropped, forbidden characters become `_`, and a
/// trailing `.psd` (any case) is replaced by `.html`.
pub fn sanitize_source_name(source_name: &str) -> String {
    let base = source_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source_name)
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if FORBIDDEN_NAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let lower = cleaned.to_ascii_lowercase();
    if lower.ends_with(SOURCE_EXTENSION) {
        let stem = &cleaned[..cleaned.len() - SOURCE_EXTENSION.len()];
        format!("{stem}{HTML_EXTENSION}")
    } else if lower.ends_with(HTML_EXTENSION) {
        cleaned
    } else {
        format!("{cleaned}{HTML_EXTENSION}")
    }
}

/// Derive the deterministic bundle ID for a session and converter source name.
///
/// The same session and source always map to the same ID, so re-uploading a
/// file of the same name overwrites the earlier bundle.
pub fn bundle_id(session_id: &str, source_name: &str) -> Result<String> {
    validate_session_id(session_id)?;
    let name = sanitize_source_name(source_name);
    if name == HTML_EXTENSION {
        return Err(request::invalid(format!(
            "Source name '{source_name}' is empty after sanitizing"
        )));
    }
    Ok(format!("{session_id}_{name}"))
}

/// Session IDs are opaque, but must be usable as a path and key component
pub fn validate_session_id(session_id: &str) -> Result<()> {
    let trimmed = session_id.trim();
    let ok = !trimmed.is_empty()
        && trimmed == session_id
        && trimmed != "."
        && trimmed != ".."
        && !session_id
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control());
    if ok {
        Ok(())
    } else {
        Err(request::invalid_session(session_id))
    }
}

/// Bundle IDs double as document keys and file names
pub fn validate_bundle_id(id: &str) -> Result<()> {
    let ok = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.chars().any(|c| c == '/' || c == '\\' || c.is_control());
    if ok {
        Ok(())
    } else {
        Err(request::invalid_bundle_id(id))
    }
}
