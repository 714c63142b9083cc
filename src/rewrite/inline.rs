//! Inline addressing mode
//!
//! Embeds the stylesheet as a `<style>` block and every `images/<name>`
//! reference as a `data:image/<type>;base64,...` URI.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use kuchiki::NodeRef;

use super::dom;
use super::grammar;
use super::{Rewrite, RewriteDiagnostic, log_diagnostics};
use crate::domain::{Bundle, ImagePayload};

/// Inline `css` and `images` into `html`
pub fn inline_assets(
    html: &str,
    css: &str,
    images: &BTreeMap<String, ImagePayload>,
) -> Rewrite {
    let document = dom::parse(html);
    let mut diagnostics = Vec::new();

    for link in dom::select_all(&document, "link[href]") {
        let Some(href) = dom::attr(&link, "href") else {
            continue;
        };
        if !grammar::is_stylesheet_ref(&href) {
            continue;
        }
        if css.is_empty() {
            diagnostics.push(RewriteDiagnostic::MissingStylesheet { reference: href });
            continue;
        }
        if let Some(style) = dom::new_element("<style></style>", "style") {
            style.append(NodeRef::new_text(escape_style_text(css)));
            let link = link.as_node();
            link.insert_before(style);
            link.detach();
        }
    }

    for element in dom::select_all(&document, "[src]") {
        let Some(src) = dom::attr(&element, "src") else {
            continue;
        };
        let Some(image) = grammar::image_ref(&src) else {
            continue;
        };
        if !image.in_images_dir() {
            continue;
        }
        let Some(payload) = images.get(image.name) else {
            diagnostics.push(RewriteDiagnostic::MissingImage {
                reference: src.clone(),
            });
            continue;
        };
        match payload.decode(image.name) {
            Ok(bytes) => {
                let uri = format!(
                    "data:image/{};base64,{}",
                    image.mime_subtype(),
                    STANDARD.encode(bytes)
                );
                dom::set_attr(&element, "src", uri);
            }
            Err(e) => diagnostics.push(RewriteDiagnostic::UndecodableImage {
                reference: src.clone(),
                reason: e.to_string(),
            }),
        }
    }

    Rewrite {
        html: dom::serialize(&document),
        diagnostics,
    }
}

/// Keep a `</style` inside the stylesheet from closing the element early
fn escape_style_text(css: &str) -> String {
    let mut escaped = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(at) = rest.find("</") {
        escaped.push_str(&rest[..at]);
        let tail = &rest[at + 2..];
        let closes_style = tail
            .get(..5)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("style"));
        escaped.push_str(if closes_style { "<\\/" } else { "</" });
        rest = tail;
    }
    escaped.push_str(rest);
    escaped
}

/// Inline a stored bundle for sandboxed preview
pub fn inline_bundle(bundle: &Bundle) -> Rewrite {
    let rewrite = inline_assets(&bundle.html, &bundle.css, &bundle.images);
    log_diagnostics(&bundle.id, &rewrite.diagnostics);
    rewrite
}
