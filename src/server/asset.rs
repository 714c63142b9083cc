//! Asset paths served under `/asset/`
//!
//! A decoded asset path is `<bundle id>/<relative path>`, where the relative
//! part is the bundle stylesheet or an image reference as produced by the
//! server-relative rewrite.

use crate::domain::Bundle;
use crate::domain::bundle::validate_bundle_id;
use crate::error::{Result, bundle, request};
use crate::rewrite::grammar::{self, STYLESHEET_PATH};

/// A bundle asset named by an `/asset/` path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRequest {
    Stylesheet { bundle_id: String },
    Image { bundle_id: String, name: String },
}

impl AssetRequest {
    pub fn bundle_id(&self) -> &str {
        match self {
            AssetRequest::Stylesheet { bundle_id } | AssetRequest::Image { bundle_id, .. } => {
                bundle_id
            }
        }
    }

    /// Bytes and content type of this asset within `source`
    pub fn resolve(&self, source: &Bundle, path: &str) -> Result<(Vec<u8>, &'static str)> {
        match self {
            AssetRequest::Stylesheet { .. } => {
                if !source.has_stylesheet() {
                    return Err(bundle::asset_not_found(path));
                }
                Ok((source.css.as_bytes().to_vec(), content_type(STYLESHEET_PATH)))
            }
            AssetRequest::Image { name, .. } => {
                let payload = source
                    .images
                    .get(name)
                    .ok_or_else(|| bundle::asset_not_found(path))?;
                Ok((payload.decode(name)?, content_type(name)))
            }
        }
    }
}

/// Parse a decoded asset path.
///
/// Traversal segments are a validation error; anything else that does not
/// name a bundle asset is not found.
pub fn parse_asset_path(path: &str) -> Result<AssetRequest> {
    let normalized = path.replace('\\', "/");
    let normalized = normalized.trim_start_matches('/');
    if normalized
        .split('/')
        .any(|segment| segment == ".." || segment == ".")
    {
        return Err(request::invalid_asset_path(path));
    }

    let (bundle_id, relative) = normalized
        .split_once('/')
        .ok_or_else(|| bundle::asset_not_found(path))?;
    validate_bundle_id(bundle_id).map_err(|_| request::invalid_asset_path(path))?;
    let bundle_id = bundle_id.to_string();

    if relative == STYLESHEET_PATH {
        return Ok(AssetRequest::Stylesheet { bundle_id });
    }
    match grammar::image_ref(relative) {
        Some(image) if image.path == relative => Ok(AssetRequest::Image {
            bundle_id,
            name: image.name.to_string(),
        }),
        _ => Err(bundle::asset_not_found(path)),
    }
}

/// Content type by file extension
pub fn content_type(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "css" => "text/css",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
