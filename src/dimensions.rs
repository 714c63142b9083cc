//! Preview size extraction from `<meta name="ad.size" content="width=..,height..">`
//!
//! Best effort: a missing tag or a malformed `content` attribute yields the
//! defaults, and width and height fall back independently.

use crate::domain::RenderDimensions;
use crate::rewrite::dom;

/// `name` of the size declaration meta tag
pub const SIZE_META_NAME: &str = "ad.size";

/// Extract the intended preview dimensions from a document
pub fn extract_dimensions(html: &str) -> RenderDimensions {
    let document = dom::parse(html);
    let mut dimensions = RenderDimensions::default();

    let content = dom::select_all(&document, "meta[name][content]")
        .into_iter()
        .find(|meta| {
            dom::attr(meta, "name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case(SIZE_META_NAME))
        })
        .and_then(|meta| dom::attr(&meta, "content"));

    let Some(content) = content else {
        return dimensions;
    };

    let (width, height) = parse_size_content(&content);
    if let Some(width) = width {
        dimensions.width = format!("{width}px");
    }
    if let Some(height) = height {
        dimensions.height = format!("{height}px");
    }
    dimensions
}

/// Parse `width=<int>,height=<int>`; each side is `None` when absent or malformed
fn parse_size_content(content: &str) -> (Option<u32>, Option<u32>) {
    let mut width = None;
    let mut height = None;
    for pair in content.split([',', ';']) {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let Ok(value) = value.trim().parse::<u32>() else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "width" => width = width.or(Some(value)),
            "height" => height = height.or(Some(value)),
            _ => {}
        }
    }
    (width, height)
}
