//! Bundle decoder
//!
//! Turns one [`ConversionResult`] into storable [`Bundle`]s. Pure: persistence
//! is the caller's job.
//!
//! Rules:
//! - a result with `success: false` fails as a whole with the tool's error
//! - an item is valid iff it reports success and carries non-empty HTML
//! - missing CSS or an empty image set only produce warnings
//! - if every item is invalid (or there are none) the decode fails with the
//!   first item's reason, in document order

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::bundle::bundle_id;
use crate::domain::conversion::ItemEntry;
use crate::domain::{Bundle, ConversionItem, ConversionResult, ImagePayload};
use crate::error::{Result, convert};

/// Fallback reason when the tool gives none
const DEFAULT_FAILURE: &str = "Processing failed";

#[cfg(test)]
mod tests;

/// Everything a bundle needs besides the tool output itself
#[derive(Debug, Clone)]
pub struct DecodeContext {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

impl DecodeContext {
    pub fn now(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// An item that did not become a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub item: String,
    pub reason: String,
}

/// A non-fatal observation about a valid item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    MissingCss { item: String },
    NoImages { item: String },
}

impl std::fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeWarning::MissingCss { item } => write!(f, "{item}: no stylesheet produced"),
            DecodeWarning::NoImages { item } => write!(f, "{item}: no images produced"),
        }
    }
}

/// Outcome of a successful decode
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    /// Valid bundles with the source name they were converted from
    pub bundles: Vec<(String, Bundle)>,
    pub rejected: Vec<Rejected>,
    pub warnings: Vec<DecodeWarning>,
}

/// Decode a conversion result into bundles for `ctx.session_id`
pub fn decode(result: &ConversionResult, ctx: &DecodeContext) -> Result<Decoded> {
    if !result.success {
        let message = result.error.as_deref().unwrap_or(DEFAULT_FAILURE);
        return Err(convert::conversion_failed(message));
    }

    let mut decoded = Decoded::default();
    for (name, entry) in &result.items {
        match validate_item(entry) {
            Ok(item) => {
                let bundle = build_bundle(name, item, ctx, &mut decoded.warnings);
                match bundle {
                    Ok(bundle) => decoded.bundles.push((name.clone(), bundle)),
                    Err(e) => decoded.rejected.push(Rejected {
                        item: name.clone(),
                        reason: e.to_string(),
                    }),
                }
            }
            Err(reason) => decoded.rejected.push(Rejected {
                item: name.clone(),
                reason,
            }),
        }
    }

    if decoded.bundles.is_empty() {
        let message = decoded
            .rejected
            .first()
            .map_or(DEFAULT_FAILURE, |r| r.reason.as_str());
        return Err(convert::conversion_failed(message));
    }

    for rejected in &decoded.rejected {
        tracing::warn!(item = %rejected.item, "skipping item: {}", rejected.reason);
    }
    for warning in &decoded.warnings {
        tracing::debug!("{warning}");
    }

    Ok(decoded)
}

fn validate_item(entry: &ItemEntry) -> std::result::Result<&ConversionItem, String> {
    let item = match entry {
        ItemEntry::Parsed(item) => item,
        ItemEntry::Malformed(reason) => return Err(reason.clone()),
    };
    if !item.success {
        return Err(item
            .error
            .clone()
            .unwrap_or_else(|| DEFAULT_FAILURE.to_string()));
    }
    match item.html.as_deref() {
        Some(html) if !html.is_empty() => Ok(item),
        _ => Err(item
            .error
            .clone()
            .unwrap_or_else(|| "Missing HTML output".to_string())),
    }
}

fn build_bundle(
    name: &str,
    item: &ConversionItem,
    ctx: &DecodeContext,
    warnings: &mut Vec<DecodeWarning>,
) -> Result<Bundle> {
    let id = bundle_id(&ctx.session_id, name)?;

    let css = item.css.clone().unwrap_or_default();
    if css.is_empty() {
        warnings.push(DecodeWarning::MissingCss {
            item: name.to_string(),
        });
    }
    if item.images.is_empty() {
        warnings.push(DecodeWarning::NoImages {
            item: name.to_string(),
        });
    }

    let images: BTreeMap<String, ImagePayload> = item
        .images
        .iter()
        .map(|(image, payload)| (image.clone(), ImagePayload::from_base64(payload.clone())))
        .collect();

    Ok(Bundle {
        id,
        session_id: ctx.session_id.clone(),
        html: item.html.clone().unwrap_or_default(),
        css,
        images,
        created_at: ctx.created_at,
    })
}
