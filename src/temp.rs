//! Private temporary directories for uploaded archives
//!
//! Temp dirs are never created under the current working directory (e.g. when
//! TMPDIR=tmp or TMPDIR=./tmp) and are removed when dropped, on every path.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Result, fs as fs_error};

/// File name used when the client sends none
const FALLBACK_UPLOAD_NAME: &str = "upload.zip";

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Directory holding one uploaded archive for the duration of a conversion
#[derive(Debug)]
pub struct UploadDir {
    dir: TempDir,
}

impl UploadDir {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("adbundle-upload-")
            .tempdir_in(temp_dir_base())
            .map_err(|e| fs_error::io_error(format!("Failed to create upload directory: {e}")))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `bytes` under the sanitized client file name
    pub fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.dir.path().join(upload_file_name(file_name));
        fs::write(&path, bytes)
            .map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))?;
        Ok(path)
    }
}

/// Last path component of a client file name, with unsafe characters replaced
pub fn upload_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*') {
                '_'
            } else {
                c
            }
        })
        .collect();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        FALLBACK_UPLOAD_NAME.to_string()
    } else {
        cleaned
    }
}
