//! Preview dimensions

use serde::Serialize;

/// Default preview width when the document declares none
pub const DEFAULT_WIDTH: &str = "100%";

/// Default preview height when the document declares none
pub const DEFAULT_HEIGHT: &str = "300px";

/// CSS lengths a bundle should be previewed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderDimensions {
    pub width: String,
    pub height: String,
}

impl Default for RenderDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH.to_string(),
            height: DEFAULT_HEIGHT.to_string(),
        }
    }
}
