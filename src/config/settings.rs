//! `adbundle.yaml` settings

use std::fs;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config};

/// Settings file looked up in the working directory
pub const CONFIG_FILE: &str = "adbundle.yaml";

/// Directory under the user's data directory holding stored bundles
const DATA_DIR: &str = "adbundle";

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_PROGRAM: &str = "python3";
const DEFAULT_SCRIPT: &str = "scripts/convert_psd.py";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_UPLOAD_LIMIT: usize = 50 * 1024 * 1024;

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Address the HTTP server listens on
    pub bind: String,

    /// Where the file store keeps documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    pub converter: ConverterSettings,

    /// Largest accepted upload body
    pub upload_limit_bytes: usize,
}

/// External conversion tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterSettings {
    pub program: String,
    /// Arguments placed before the archive path
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            data_dir: None,
            converter: ConverterSettings::default(),
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT,
        }
    }
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: vec![DEFAULT_SCRIPT.to_string()],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, `adbundle.yaml` in the
    /// working directory is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                match fs::read_to_string(default) {
                    Ok(content) => Self::parse(&content, default),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
                    Err(e) => Err(config::read_failed(default.display().to_string(), e.to_string())),
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;
        Self::parse(&content, path)
    }

    /// Parse settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        // An empty file is valid and means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml::from_str(content)
            .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        if self.converter.program.trim().is_empty() {
            return Err(config::invalid("converter.program must not be empty"));
        }
        if self.converter.timeout_secs == 0 {
            return Err(config::invalid("converter.timeout_secs must be positive"));
        }
        if self.upload_limit_bytes == 0 {
            return Err(config::invalid("upload_limit_bytes must be positive"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|_| config::invalid(format!("bind '{}' is not a socket address", self.bind)))
    }

    /// Resolve the data directory: explicit override, then the settings
    /// file, then the platform data directory.
    pub fn data_dir(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = explicit {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| config::invalid("Could not determine data directory"))?;
        Ok(base.join(DATA_DIR))
    }
}
