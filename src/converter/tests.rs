use super::*;

#[test]
fn test_failure_message_prefers_stderr() {
    assert_eq!(
        failure_message("boom", r#"{"error":"other"}"#).as_deref(),
        Some("boom")
    );
    assert_eq!(
        failure_message("", r#"{"success":false,"error":"Input file must be a ZIP file"}"#)
            .as_deref(),
        Some("Input file must be a ZIP file")
    );
    assert_eq!(failure_message("", "garbage"), None);
}

#[cfg(unix)]
mod process {
    use std::fs;
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::error::AdBundleError;

    fn script(dir: &TempDir, body: &str) -> Converter {
        let path = dir.path().join("convert.sh");
        fs::write(&path, body).unwrap();
        Converter::new(
            "sh",
            vec![path.to_string_lossy().into_owned()],
            Duration::from_secs(10),
        )
    }

    #[tokio::test]
    async fn test_run_parses_stdout() {
        let dir = TempDir::new().unwrap();
        let converter = script(
            &dir,
            r#"echo '{"success":true,"results":{"a.psd":{"success":true,"html":"<p>a</p>"}}}'"#,
        );
        let result = converter.run(Path::new("upload.zip")).await.unwrap();
        assert!(result.success);
        assert_eq!(result.items.len(), 1);
    }

    #[tokio::test]
    async fn test_archive_path_is_last_argument() {
        let dir = TempDir::new().unwrap();
        let converter = script(
            &dir,
            r#"printf '{"success":true,"html":"%s"}' "$1""#,
        );
        let result = converter.run(Path::new("designs.zip")).await.unwrap();
        let crate::domain::conversion::ItemEntry::Parsed(item) = &result.items[0].1 else {
            panic!("legacy item should parse");
        };
        assert_eq!(item.html.as_deref(), Some("designs.zip"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        let dir = TempDir::new().unwrap();
        let converter = script(&dir, "echo 'psd-tools missing' >&2\nexit 3");
        let err = converter.run(Path::new("x.zip")).await.unwrap_err();
        assert!(matches!(err, AdBundleError::ToolFailed { .. }));
        assert_eq!(err.to_string(), "psd-tools missing");
    }

    #[tokio::test]
    async fn test_nonzero_exit_without_output_reports_status() {
        let dir = TempDir::new().unwrap();
        let converter = script(&dir, "exit 2");
        let err = converter.run(Path::new("x.zip")).await.unwrap_err();
        assert!(err.to_string().starts_with("Converter exited with"));
    }

    #[tokio::test]
    async fn test_unparsable_stdout() {
        let dir = TempDir::new().unwrap();
        let converter = script(&dir, "echo not json");
        let err = converter.run(Path::new("x.zip")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON output: not json\n");
    }

    #[tokio::test]
    async fn test_timeout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slow.sh");
        fs::write(&path, "sleep 5").unwrap();
        let converter = Converter::new(
            "sh",
            vec![path.to_string_lossy().into_owned()],
            Duration::from_millis(200),
        );
        let err = converter.run(Path::new("x.zip")).await.unwrap_err();
        assert!(matches!(err, AdBundleError::ToolTimedOut { .. }));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let converter = Converter::new(
            "adbundle-no-such-program",
            Vec::new(),
            Duration::from_secs(1),
        );
        let err = converter.run(Path::new("x.zip")).await.unwrap_err();
        assert!(matches!(err, AdBundleError::ToolLaunchFailed { .. }));
    }
}
