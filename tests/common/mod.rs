//! Common test utilities for adbundle integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// One converted design with a stylesheet, an image and editable elements
pub const BANNER_RESULT: &str = r#"{"success":true,"results":{
  "banner.psd":{"success":true,
    "html":"<!DOCTYPE html><html><head><meta name=\"ad.size\" content=\"width=300,height=250\"><link rel=\"stylesheet\" href=\"css/style.css\"></head><body><div id=\"stage\"><h1 id=\"sd_txta_Heading\">Big sale</h1><a id=\"sd_btn_Click-Through-URL\">Buy</a></div><img src=\"images/logo.png\"></body></html>",
    "css":"h1{color:red}",
    "images":{"logo.png":"iVBORw0KGgo="}},
  "broken.psd":{"success":false,"error":"Layer parse error"}
}}"#;

/// A temporary working directory with an `adbundle.yaml` pointing at a fake
/// converter and a private data directory
#[allow(dead_code)]
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
    pub data_dir: PathBuf,
}

impl TestWorkspace {
    /// Workspace whose converter prints `output` on stdout and exits 0
    pub fn with_converter_output(output: &str) -> Self {
        Self::with_converter_script(&format!("cat <<'JSON'\n{output}\nJSON\n"))
    }

    /// Workspace whose converter runs `script` under `sh`
    pub fn with_converter_script(script: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let data_dir = path.join("data");

        let script_path = path.join("convert.sh");
        std::fs::write(&script_path, script).expect("Failed to write converter script");
        std::fs::write(
            path.join("adbundle.yaml"),
            format!(
                "converter:\n  program: sh\n  args: [\"{}\"]\n  timeout_secs: 10\n",
                script_path.display()
            ),
        )
        .expect("Failed to write adbundle.yaml");

        Self {
            temp,
            path,
            data_dir,
        }
    }

    /// Write a file in the workspace
    pub fn write_file(&self, path: &str, content: &[u8]) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Read a file from the workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Path of a stored document in the local namespace
    pub fn document_path(&self, id: &str) -> PathBuf {
        self.data_dir
            .join("local")
            .join("convertedHtml")
            .join(format!("{id}.json"))
    }

    /// `adbundle` run inside this workspace, isolated from the caller's
    /// environment
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("adbundle").expect("Failed to find adbundle binary");
        cmd.current_dir(&self.path);
        cmd.env("ADBUNDLE_DATA_DIR", &self.data_dir);
        cmd.env_remove("ADBUNDLE_CONFIG");
        cmd.env_remove("RUST_LOG");
        cmd.env_remove("FIREBASE_ADMIN_PROJECT_ID");
        cmd.env_remove("FIREBASE_ADMIN_CLIENT_EMAIL");
        cmd.env_remove("FIREBASE_ADMIN_PRIVATE_KEY");
        cmd
    }

    /// Convert a dummy archive into session `session`
    pub fn convert(&self, session: &str) {
        self.write_file("ads.zip", b"PK\x03\x04");
        self.cmd()
            .args(["convert", "ads.zip", "--session", session])
            .assert()
            .success();
    }
}
