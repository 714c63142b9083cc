//! Attribute-value grammar for asset references
//!
//! Matching is done on individual attribute values of a parsed document,
//! never on raw HTML text, so quoting style and attribute order are
//! irrelevant. Values are matched after trimming ASCII whitespace.
//!
//! ```text
//! stylesheet-ref := ["./"] "css/style.css"                  ; <link href=...>
//! image-ref      := ["./"] path                             ; any element's src=...
//! path           := segment *("/" segment) "." ext
//! segment        := 1*(any char except "/" "\" "?" "#" ":"), not "." or ".."
//! ext            := "png" | "jpg" | "jpeg" | "gif"          ; ASCII case-insensitive
//! ```
//!
//! Root-relative values (leading `/`), absolute URLs and `data:` URIs never
//! match. Both rewrite targets (`/asset/...` and `data:image/...`) therefore
//! fall outside the grammar, which is what makes rewriting idempotent.

/// Conventional stylesheet location inside a bundle
pub const STYLESHEET_PATH: &str = "css/style.css";

/// Conventional directory for image payloads inside a bundle
pub const IMAGES_DIR: &str = "images/";

/// Image extensions recognized as bundle assets
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// A matched image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef<'a> {
    /// Path relative to the bundle root, without any leading `./`
    pub path: &'a str,
    /// Payload name: `path` with a leading `images/` removed
    pub name: &'a str,
    /// Lowercased file extension
    pub extension: String,
}

impl ImageRef<'_> {
    /// Whether the reference uses the conventional `images/` directory
    pub fn in_images_dir(&self) -> bool {
        self.path.len() != self.name.len()
    }

    /// MIME subtype for data URIs and responses
    pub fn mime_subtype(&self) -> &'static str {
        mime_subtype(&self.extension)
    }
}

/// MIME subtype for a lowercased image extension
pub fn mime_subtype(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "jpeg",
        "gif" => "gif",
        _ => "png",
    }
}

fn strip_dot_slash(value: &str) -> &str {
    let value = value.trim_matches(|c: char| c.is_ascii_whitespace());
    value.strip_prefix("./").unwrap_or(value)
}

/// Does an `href` value reference the bundle stylesheet?
pub fn is_stylesheet_ref(value: &str) -> bool {
    strip_dot_slash(value) == STYLESHEET_PATH
}

/// Match a `src` value against the image grammar
pub fn image_ref(value: &str) -> Option<ImageRef<'_>> {
    let path = strip_dot_slash(value);
    if path.is_empty() || path.starts_with('/') {
        return None;
    }

    let segments_ok = path.split('/').all(|segment| {
        !segment.is_empty()
            && segment != "."
            && segment != ".."
            && !segment.contains(['\\', '?', '#', ':'])
    });
    if !segments_ok {
        return None;
    }

    let (_, extension) = path.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }

    let name = path.strip_prefix(IMAGES_DIR).unwrap_or(path);
    Some(ImageRef {
        path,
        name,
        extension,
    })
}
