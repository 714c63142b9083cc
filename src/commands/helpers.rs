//! Command helper utilities

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::cli::GlobalArgs;
use crate::config::{ServiceIdentity, Settings, identity};
use crate::converter::Converter;
use crate::error::{Result, fs as fs_error};
use crate::store::{BundleRepository, FileStore};

/// Settings and storage resolved from the global options
pub struct Context {
    pub settings: Settings,
    pub repo: BundleRepository,
}

impl Context {
    /// Load settings, pick the store namespace from the service identity and
    /// open the file store under the data directory.
    pub fn open(globals: &GlobalArgs) -> Result<Self> {
        let settings = Settings::load(globals.config.as_deref())?;
        let service_identity = ServiceIdentity::from_env()?;
        let data_dir = settings.data_dir(globals.data_dir.as_deref())?;
        let store = FileStore::open(&data_dir, identity::namespace(service_identity.as_ref()))?;
        tracing::debug!(root = %store.root().display(), "opened document store");

        Ok(Self {
            settings,
            repo: BundleRepository::new(Arc::new(store)),
        })
    }

    pub fn converter(&self) -> Converter {
        Converter::from_settings(&self.settings.converter)
    }
}

/// Runtime for commands that drive async work
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| fs_error::io_error(format!("Failed to start async runtime: {e}")))
}

/// Write `bytes` to `path`, creating parent directories
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| fs_error::write_failed(parent.display().to_string(), e.to_string()))?;
    }
    std::fs::write(path, bytes)
        .map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
