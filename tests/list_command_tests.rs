//! List and show command tests

mod common;

use predicates::prelude::*;

#[test]
fn test_list_empty() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No bundles stored."));
}

#[test]
fn test_list_groups_by_session() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace.convert("s1");
    workspace.convert("s2");

    workspace
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored bundles (2):"))
        .stdout(predicate::str::contains("s1_banner.html"))
        .stdout(predicate::str::contains("s2_banner.html"));
}

#[test]
fn test_list_session_filter_json() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace.convert("s1");
    workspace.convert("s2");

    let output = workspace
        .cmd()
        .args(["list", "--session", "s2", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        entries,
        serde_json::json!([{
            "name": "banner.html",
            "folder": "s2",
            "url": "/bundle/s2_banner.html/html"
        }])
    );
}

#[test]
fn test_show_summary() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace.convert("s1");

    workspace
        .cmd()
        .args(["show", "s1_banner.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session: s1"))
        .stdout(predicate::str::contains("300px x 250px"))
        .stdout(predicate::str::contains("logo.png (8 bytes)"))
        .stdout(predicate::str::contains("blake3:"));
}

#[test]
fn test_show_html_uses_asset_urls() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace.convert("s1");

    workspace
        .cmd()
        .args(["show", "s1_banner.html", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/asset/s1_banner.html%2Fimages%2Flogo.png"))
        .stdout(predicate::str::contains("/asset/s1_banner.html%2Fcss%2Fstyle.css"));
}

#[test]
fn test_show_missing_bundle() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace
        .cmd()
        .args(["show", "s1_nothing.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document not found: s1_nothing.html"));
}
