//! Decoder tests

use super::*;
use crate::domain::ConversionResult;

fn ctx() -> DecodeContext {
    DecodeContext::now("sess")
}

fn ok_item(html: &str) -> ConversionItem {
    ConversionItem {
        success: true,
        html: Some(html.to_string()),
        ..Default::default()
    }
}

fn failed_item(error: &str) -> ConversionItem {
    ConversionItem {
        success: false,
        error: Some(error.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_top_level_failure_wins_over_items() {
    let mut result = ConversionResult::from_items([("a.psd".to_string(), ok_item("<p>a</p>"))]);
    result.success = false;
    result.error = Some("No PSD files found in the ZIP".to_string());

    let err = decode(&result, &ctx()).unwrap_err();
    assert_eq!(err.to_string(), "No PSD files found in the ZIP");
}

#[test]
fn test_top_level_failure_without_message() {
    let result = ConversionResult {
        success: false,
        error: None,
        items: Vec::new(),
    };
    let err = decode(&result, &ctx()).unwrap_err();
    assert_eq!(err.to_string(), "Processing failed");
}

#[test]
fn test_all_items_failed_reports_first_reason() {
    let result = ConversionResult::from_items([
        ("one.psd".to_string(), failed_item("first broke")),
        ("two.psd".to_string(), failed_item("second broke")),
    ]);
    let err = decode(&result, &ctx()).unwrap_err();
    assert_eq!(err.to_string(), "first broke");
}

#[test]
fn test_empty_results_fail() {
    let result = ConversionResult::from_items(Vec::<(String, ConversionItem)>::new());
    assert!(decode(&result, &ctx()).is_err());
}

#[test]
fn test_partial_failure_keeps_valid_items() {
    let result = ConversionResult::from_items([
        ("bad.psd".to_string(), failed_item("layer error")),
        ("good.psd".to_string(), ok_item("<p>ok</p>")),
    ]);
    let decoded = decode(&result, &ctx()).unwrap();
    assert_eq!(decoded.bundles.len(), 1);
    assert_eq!(decoded.bundles[0].1.id, "sess_good.html");
    assert_eq!(
        decoded.rejected,
        vec![Rejected {
            item: "bad.psd".to_string(),
            reason: "layer error".to_string()
        }]
    );
}

#[test]
fn test_empty_html_is_invalid() {
    let result = ConversionResult::from_items([
        ("empty.psd".to_string(), ok_item("")),
        ("full.psd".to_string(), ok_item("<p/>")),
    ]);
    let decoded = decode(&result, &ctx()).unwrap();
    assert_eq!(decoded.rejected[0].reason, "Missing HTML output");
}

#[test]
fn test_missing_css_and_images_are_warnings() {
    let result = ConversionResult::from_items([("a.psd".to_string(), ok_item("<p>a</p>"))]);
    let decoded = decode(&result, &ctx()).unwrap();
    assert_eq!(decoded.bundles.len(), 1);
    assert!(decoded.bundles[0].1.css.is_empty());
    assert_eq!(
        decoded.warnings,
        vec![
            DecodeWarning::MissingCss {
                item: "a.psd".to_string()
            },
            DecodeWarning::NoImages {
                item: "a.psd".to_string()
            },
        ]
    );
}

#[test]
fn test_bundle_carries_css_images_and_context() {
    let mut item = ok_item("<img src='images/logo.png'>");
    item.css = Some("body{}".to_string());
    item.images
        .insert("logo.png".to_string(), "iVBORw0KGgo=".to_string());
    let context = ctx();
    let result = ConversionResult::from_items([("banner1.psd".to_string(), item)]);

    let decoded = decode(&result, &context).unwrap();
    let (source, bundle) = &decoded.bundles[0];
    assert_eq!(source, "banner1.psd");
    assert_eq!(bundle.id, "sess_banner1.html");
    assert_eq!(bundle.session_id, "sess");
    assert_eq!(bundle.css, "body{}");
    assert_eq!(bundle.created_at, context.created_at);
    assert_eq!(
        bundle.images.get("logo.png").map(ImagePayload::as_base64),
        Some("iVBORw0KGgo=")
    );
    assert!(decoded.warnings.is_empty());
}

#[test]
fn test_invalid_session_rejects_items() {
    let result = ConversionResult::from_items([("a.psd".to_string(), ok_item("<p/>"))]);
    let err = decode(&result, &DecodeContext::now("bad/session")).unwrap_err();
    assert!(err.to_string().contains("Invalid session ID"));
}
