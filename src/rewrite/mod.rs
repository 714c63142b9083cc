//! Asset reference rewriting
//!
//! Converted HTML refers to its stylesheet and images by bundle-relative
//! paths (see [`grammar`]). Two addressing modes rewrite those references:
//!
//! - [`server`]: into `/asset/<encoded path>` URLs served by the HTTP API
//! - [`inline`]: into an embedded `<style>` block and `data:` image URIs, for
//!   dependency-free sandboxed previews
//!
//! Both modes work on a parsed document tree and serialize it back with a
//! literal doctype. A reference whose payload is missing is left untouched
//! and reported as a [`RewriteDiagnostic`]; it never fails the rewrite.

pub mod dom;
pub mod grammar;
pub mod inline;
pub mod server;

#[cfg(test)]
mod tests;

use std::fmt;

pub use inline::{inline_assets, inline_bundle};
pub use server::{asset_url, rewrite_bundle_for_server, rewrite_for_server};

/// Rewritten HTML plus what could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub html: String,
    pub diagnostics: Vec<RewriteDiagnostic>,
}

/// A reference that was left as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteDiagnostic {
    MissingImage { reference: String },
    MissingStylesheet { reference: String },
    UndecodableImage { reference: String, reason: String },
}

impl fmt::Display for RewriteDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteDiagnostic::MissingImage { reference } => {
                write!(f, "no image payload for '{reference}'")
            }
            RewriteDiagnostic::MissingStylesheet { reference } => {
                write!(f, "no stylesheet for '{reference}'")
            }
            RewriteDiagnostic::UndecodableImage { reference, reason } => {
                write!(f, "image payload for '{reference}' is not valid base64: {reason}")
            }
        }
    }
}

/// What payloads a bundle can serve
pub trait AssetLookup {
    fn has_stylesheet(&self) -> bool;
    fn has_image(&self, name: &str) -> bool;
}

impl AssetLookup for crate::domain::Bundle {
    fn has_stylesheet(&self) -> bool {
        !self.css.is_empty()
    }

    fn has_image(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }
}

pub(crate) fn log_diagnostics(context: &str, diagnostics: &[RewriteDiagnostic]) {
    for diagnostic in diagnostics {
        tracing::warn!(bundle = %context, "{diagnostic}");
    }
}
