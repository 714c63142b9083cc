//! Server-relative addressing mode

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::dom;
use super::grammar::{self, STYLESHEET_PATH};
use super::{AssetLookup, Rewrite, RewriteDiagnostic, log_diagnostics};
use crate::domain::Bundle;

/// Route prefix under which bundle assets are served
pub const ASSET_ROUTE: &str = "/asset/";

/// Characters left unescaped, matching `encodeURIComponent`
pub(crate) const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Retrieval URL for `relative` inside the logical directory `base_dir`.
///
/// The joined path always uses forward slashes and is encoded as a single
/// URL component.
pub fn asset_url(base_dir: &str, relative: &str) -> String {
    let base = base_dir.replace('\\', "/");
    let base = base.trim_end_matches('/');
    let joined = if base.is_empty() {
        relative.to_string()
    } else {
        format!("{base}/{relative}")
    };
    format!(
        "{ASSET_ROUTE}{}",
        utf8_percent_encode(&joined, COMPONENT)
    )
}

/// Rewrite stylesheet and image references in `html` to asset URLs rooted at `base_dir`
pub fn rewrite_for_server(html: &str, base_dir: &str, assets: &dyn AssetLookup) -> Rewrite {
    let document = dom::parse(html);
    let mut diagnostics = Vec::new();

    for link in dom::select_all(&document, "link[href]") {
        let Some(href) = dom::attr(&link, "href") else {
            continue;
        };
        if !grammar::is_stylesheet_ref(&href) {
            continue;
        }
        if assets.has_stylesheet() {
            dom::set_attr(&link, "href", asset_url(base_dir, STYLESHEET_PATH));
        } else {
            diagnostics.push(RewriteDiagnostic::MissingStylesheet { reference: href });
        }
    }

    for element in dom::select_all(&document, "[src]") {
        let Some(src) = dom::attr(&element, "src") else {
            continue;
        };
        let Some(image) = grammar::image_ref(&src) else {
            continue;
        };
        if assets.has_image(image.name) {
            let url = asset_url(base_dir, image.path);
            dom::set_attr(&element, "src", url);
        } else {
            diagnostics.push(RewriteDiagnostic::MissingImage {
                reference: src.clone(),
            });
        }
    }

    Rewrite {
        html: dom::serialize(&document),
        diagnostics,
    }
}

/// Rewrite a stored bundle for serving; the bundle ID is its logical directory
pub fn rewrite_bundle_for_server(bundle: &Bundle) -> Rewrite {
    let rewrite = rewrite_for_server(&bundle.html, &bundle.id, bundle);
    log_diagnostics(&bundle.id, &rewrite.diagnostics);
    rewrite
}
