//! Package, preview and clear command tests

mod common;

use std::io::Read;

use predicates::prelude::*;

#[test]
fn test_package_writes_zip() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace.convert("s1");

    workspace
        .cmd()
        .args(["package", "s1_banner.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s1_banner.zip"))
        .stdout(predicate::str::contains("blake3:"));

    let file = std::fs::File::open(workspace.path.join("s1_banner.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let names: Vec<String> = archive.file_names().map(ToString::to_string).collect();
    assert!(names.contains(&"index.html".to_string()));
    assert!(names.contains(&"css/style.css".to_string()));
    assert!(names.contains(&"images/logo.png".to_string()));

    let mut css = String::new();
    archive
        .by_name("css/style.css")
        .unwrap()
        .read_to_string(&mut css)
        .unwrap();
    assert_eq!(css, "h1{color:red}");

    let mut index = String::new();
    archive
        .by_name("index.html")
        .unwrap()
        .read_to_string(&mut index)
        .unwrap();
    assert!(index.contains("/asset/s1_banner.html%2Fimages%2Flogo.png"));
}

#[test]
fn test_package_custom_output() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace.convert("s1");

    workspace
        .cmd()
        .args(["package", "s1_banner.html", "-o", "dist/banner.zip"])
        .assert()
        .success();
    assert!(workspace.file_exists("dist/banner.zip"));
}

#[test]
fn test_preview_page_is_sandboxed() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace.convert("s1");

    workspace
        .cmd()
        .args(["preview", "--session", "s1", "-o", "preview.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 frame(s)"));

    let page = workspace.read_file("preview.html");
    assert!(page.contains(r#"sandbox="allow-scripts""#));
    assert!(page.contains("width:300px;height:250px"));
    assert!(page.contains("data:image/png;base64,iVBORw0KGgo="));
}

#[test]
fn test_preview_to_stdout() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace.convert("s1");

    workspace
        .cmd()
        .args(["preview", "s1_banner.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<iframe"))
        .stdout(predicate::str::contains("Previews: s1_banner.html"));
}

#[test]
fn test_preview_empty_session() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace
        .cmd()
        .args(["preview", "--session", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No previews found for this session"));
}

#[test]
fn test_clear_with_yes() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace.convert("s1");

    workspace
        .cmd()
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 stored bundle(s)"));
    assert!(!workspace.document_path("s1_banner.html").exists());
}

#[test]
fn test_clear_without_terminal_requires_yes() {
    let workspace = common::TestWorkspace::with_converter_output(common::BANNER_RESULT);
    workspace.convert("s1");

    workspace
        .cmd()
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert!(workspace.document_path("s1_banner.html").exists());
}
