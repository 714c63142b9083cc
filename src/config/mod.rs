//! Configuration for adbundle
//!
//! This module contains:
//! - `adbundle.yaml` - server, storage and converter settings
//! - the persistence service identity read from the environment

pub mod identity;
pub mod settings;

pub use identity::ServiceIdentity;
pub use settings::{CONFIG_FILE, ConverterSettings, Settings};
