//! Sandboxed preview frames
//!
//! Each bundle is shown in its own `<iframe srcdoc>` with inline assets. The
//! sandbox allows scripts only: no same-origin access, no top-level
//! navigation, no forms or popups.

use kuchiki::NodeRef;

use crate::dimensions::extract_dimensions;
use crate::domain::{Bundle, RenderDimensions};
use crate::rewrite::{self, dom};

/// Sandbox flags for every preview frame
pub const SANDBOX: &str = "allow-scripts";

const PAGE_SKELETON: &str = r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title></title>
<style>body{font-family:sans-serif;margin:20px}figure{margin:0 0 24px}figcaption{margin-bottom:8px;font-weight:bold}</style>
</head><body><main id="previews"></main></body></html>"#;

/// One bundle ready to be displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFrame {
    pub id: String,
    pub title: String,
    pub srcdoc: String,
    pub dimensions: RenderDimensions,
}

impl PreviewFrame {
    /// Inline the bundle's assets and read its intended size
    pub fn for_bundle(bundle: &Bundle) -> Self {
        let inlined = rewrite::inline_bundle(bundle);
        Self {
            id: bundle.id.clone(),
            title: bundle.display_name().to_string(),
            dimensions: extract_dimensions(&bundle.html),
            srcdoc: inlined.html,
        }
    }

    fn to_node(&self) -> Option<NodeRef> {
        let figure = dom::new_element("<figure><figcaption></figcaption><iframe></iframe></figure>", "figure")?;
        if let Ok(caption) = figure.select_first("figcaption") {
            caption.as_node().append(NodeRef::new_text(self.title.clone()));
        }
        let iframe = figure.select_first("iframe").ok()?;
        {
            let mut attributes = iframe.attributes.borrow_mut();
            attributes.insert("sandbox", SANDBOX.to_string());
            attributes.insert("title", self.title.clone());
            attributes.insert("data-bundle", self.id.clone());
            attributes.insert(
                "style",
                format!(
                    "width:{};height:{};border:0",
                    self.dimensions.width, self.dimensions.height
                ),
            );
            attributes.insert("srcdoc", self.srcdoc.clone());
        }
        Some(figure)
    }
}

/// A full HTML page with one sandboxed frame per preview
pub fn render_page(title: &str, frames: &[PreviewFrame]) -> String {
    let document = dom::parse(PAGE_SKELETON);
    if let Ok(title_el) = document.select_first("title") {
        title_el.as_node().append(NodeRef::new_text(title));
    }
    if let Ok(container) = document.select_first("#previews") {
        for frame in frames {
            if let Some(node) = frame.to_node() {
                container.as_node().append(node);
            }
        }
    }
    dom::serialize(&document)
}
