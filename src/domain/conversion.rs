//! Output of the external conversion tool
//!
//! The tool prints one JSON document on stdout:
//!
//! ```text
//! { "success": bool, "error"?: string,
//!   "results": { "<source>": { "success": bool, "error"?: string, "html": string,
//!                              "css"?: string, "images"?: { "<name>": "<base64>" } } } }
//! ```
//!
//! Item order follows the order of keys in the document.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, convert};

/// Source name used for legacy single-output documents without `results`
pub const LEGACY_SOURCE_NAME: &str = "output.psd";

/// One converted source file as reported by the tool
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConversionItem {
    #[serde(default = "default_item_success")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub css: Option<String>,
    #[serde(default)]
    pub images: BTreeMap<String, String>,
}

fn default_item_success() -> bool {
    true
}

/// An item as found in the tool output: parsed, or the reason it could not be
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEntry {
    Parsed(ConversionItem),
    Malformed(String),
}

/// Whole-invocation result, immutable once parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub success: bool,
    pub error: Option<String>,
    pub items: Vec<(String, ItemEntry)>,
}

impl ConversionResult {
    /// Parse the tool's stdout
    pub fn from_json(stdout: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(stdout.trim()).map_err(|_| convert::invalid_output(stdout))?;
        let Value::Object(root) = value else {
            return Err(convert::invalid_output(stdout));
        };

        let success = root.get("success").and_then(Value::as_bool).unwrap_or(false);
        let error = root
            .get("error")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        let items = match root.get("results") {
            Some(Value::Object(results)) => results
                .iter()
                .map(|(name, raw)| (name.clone(), parse_item(raw)))
                .collect(),
            Some(_) => return Err(convert::invalid_output(stdout)),
            None if root.contains_key("html") => {
                vec![(
                    LEGACY_SOURCE_NAME.to_string(),
                    parse_item(&Value::Object(root.clone())),
                )]
            }
            None => Vec::new(),
        };

        Ok(Self {
            success,
            error,
            items,
        })
    }

    /// Build a successful result from already-typed items
    #[cfg(test)]
    pub fn from_items(items: impl IntoIterator<Item = (String, ConversionItem)>) -> Self {
        Self {
            success: true,
            error: None,
            items: items
                .into_iter()
                .map(|(name, item)| (name, ItemEntry::Parsed(item)))
                .collect(),
        }
    }
}

fn parse_item(raw: &Value) -> ItemEntry {
    match serde_json::from_value::<ConversionItem>(raw.clone()) {
        Ok(item) => ItemEntry::Parsed(item),
        Err(e) => ItemEntry::Malformed(format!("Malformed result entry: {e}")),
    }
}
