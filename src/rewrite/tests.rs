//! Rewriter tests covering both addressing modes

use std::collections::BTreeMap;

use chrono::Utc;

use super::*;
use crate::domain::{Bundle, ImagePayload};

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta name="ad.size" content="width=300,height=250" />
<link rel="stylesheet" href="https://digital.mediaferry.com/animation.css">
<link rel="stylesheet" href="./css/style.css" />
</head>
<body>
<div class="container" id="sd_bgcolor_Main-Background">
<img src="images/logo.png" alt="logo" id="sd_img_Logo"/>
<img src='./images/hero.jpg' alt="hero">
<img src="https://cdn.example.com/remote.png">
</div>
</body>
</html>
"#;

fn bundle(css: &str, images: &[(&str, &[u8])]) -> Bundle {
    Bundle {
        id: "s1_banner1.html".to_string(),
        session_id: "s1".to_string(),
        html: PAGE.to_string(),
        css: css.to_string(),
        images: images
            .iter()
            .map(|(name, bytes)| (name.to_string(), ImagePayload::from_bytes(bytes)))
            .collect(),
        created_at: Utc::now(),
    }
}

#[test]
fn test_asset_url_encodes_whole_path() {
    assert_eq!(
        asset_url("Business_Dental_160x600", "css/style.css"),
        "/asset/Business_Dental_160x600%2Fcss%2Fstyle.css"
    );
    assert_eq!(asset_url("dir\\sub\\", "images/a b.png"), "/asset/dir%2Fsub%2Fimages%2Fa%20b.png");
}

#[test]
fn test_server_mode_rewrites_stylesheet_and_images() {
    let b = bundle("body{}", &[("logo.png", b"png"), ("hero.jpg", b"jpg")]);
    let rewrite = rewrite_bundle_for_server(&b);

    assert!(rewrite.diagnostics.is_empty(), "{:?}", rewrite.diagnostics);
    assert!(rewrite.html.contains(r#"href="/asset/s1_banner1.html%2Fcss%2Fstyle.css""#));
    assert!(rewrite.html.contains(r#"src="/asset/s1_banner1.html%2Fimages%2Flogo.png""#));
    assert!(rewrite.html.contains(r#"src="/asset/s1_banner1.html%2Fimages%2Fhero.jpg""#));
    assert!(rewrite.html.contains("https://digital.mediaferry.com/animation.css"));
    assert!(rewrite.html.contains("https://cdn.example.com/remote.png"));
    assert!(rewrite.html.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_server_mode_is_idempotent() {
    let b = bundle("body{}", &[("logo.png", b"png"), ("hero.jpg", b"jpg")]);
    let once = rewrite_for_server(&b.html, &b.id, &b);
    let twice = rewrite_for_server(&once.html, &b.id, &b);
    assert_eq!(once.html, twice.html);
    assert!(twice.diagnostics.is_empty());
}

#[test]
fn test_server_mode_missing_payload_left_unmodified() {
    let b = bundle("", &[("logo.png", b"png")]);
    let rewrite = rewrite_bundle_for_server(&b);

    assert!(rewrite.html.contains(r#"src="./images/hero.jpg""#));
    assert!(rewrite.html.contains(r#"href="./css/style.css""#));
    assert_eq!(
        rewrite.diagnostics,
        vec![
            RewriteDiagnostic::MissingStylesheet {
                reference: "./css/style.css".to_string()
            },
            RewriteDiagnostic::MissingImage {
                reference: "./images/hero.jpg".to_string()
            },
        ]
    );
}

#[test]
fn test_inline_mode_embeds_css_and_images() {
    let b = bundle(".container{width:300px}", &[("logo.png", b"\x89PNG"), ("hero.jpg", b"\xff\xd8")]);
    let rewrite = inline_bundle(&b);

    assert!(rewrite.diagnostics.is_empty(), "{:?}", rewrite.diagnostics);
    assert!(rewrite.html.contains("<style>.container{width:300px}</style>"));
    assert!(!rewrite.html.contains("css/style.css"));
    assert!(rewrite.html.contains(r#"src="data:image/png;base64,iVBORw==""#));
    assert!(rewrite.html.contains(r#"src="data:image/jpeg;base64,/9g=""#));
    assert!(rewrite.html.contains("https://digital.mediaferry.com/animation.css"));
}

#[test]
fn test_inline_mode_is_idempotent() {
    let b = bundle("p{}", &[("logo.png", b"x"), ("hero.jpg", b"y")]);
    let once = inline_assets(&b.html, &b.css, &b.images);
    let twice = inline_assets(&once.html, &b.css, &b.images);
    assert_eq!(once.html, twice.html);
}

#[test]
fn test_inline_mode_missing_and_broken_payloads() {
    let mut images = BTreeMap::new();
    images.insert("logo.png".to_string(), ImagePayload::from_base64("%%%"));
    let rewrite = inline_assets(PAGE, "", &images);

    assert!(rewrite.html.contains(r#"src="images/logo.png""#));
    assert!(rewrite.html.contains(r#"href="./css/style.css""#));
    assert_eq!(rewrite.diagnostics.len(), 3);
    assert!(matches!(
        rewrite.diagnostics[0],
        RewriteDiagnostic::MissingStylesheet { .. }
    ));
    assert!(matches!(
        rewrite.diagnostics[1],
        RewriteDiagnostic::UndecodableImage { .. }
    ));
    assert!(matches!(
        rewrite.diagnostics[2],
        RewriteDiagnostic::MissingImage { .. }
    ));
}

#[test]
fn test_attribute_order_and_quoting_do_not_matter() {
    let html = r#"<link href='css/style.css' rel=stylesheet><img alt=x src=images/logo.png>"#;
    let b = bundle("a{}", &[("logo.png", b"1")]);
    let rewrite = rewrite_for_server(html, "dir", &b);
    assert!(rewrite.html.contains(r#"href="/asset/dir%2Fcss%2Fstyle.css""#));
    assert!(rewrite.html.contains(r#"src="/asset/dir%2Fimages%2Flogo.png""#));
}

#[test]
fn test_inline_mode_keeps_closing_style_tag_inside_stylesheet() {
    let css = "a{content:\"</STYLE><script>alert(1)</script>\"}";
    let rewrite = inline_assets(PAGE, css, &BTreeMap::new());
    assert!(rewrite.html.contains(r#"<\/STYLE><script>alert(1)</script>"#));

    let reparsed = dom::parse(&rewrite.html);
    assert_eq!(dom::select_all(&reparsed, "style").len(), 1);
    assert!(dom::select_all(&reparsed, "script").is_empty());
}
