//! Error types and handling for adbundle
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`request`]: Request validation errors
//! - [`convert`]: External conversion tool errors
//! - [`store`]: Document store errors
//! - [`bundle`]: Bundle lookup errors
//! - [`package`]: Package assembly errors
//! - [`fs`]: File system errors
//! - [`config`]: Configuration errors
//!
//! Every variant belongs to one [`ErrorKind`], which decides the HTTP status
//! used when the error crosses the server boundary.

#![allow(dead_code, unused_assignments)]

pub mod bundle;
pub mod config;
pub mod convert;
pub mod fs;
pub mod package;
pub mod request;
pub mod store;

mod response;


use miette::Diagnostic;
use thiserror::Error;

/// Coarse error classes surfaced to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// User-correctable request problem
    Validation,
    /// The external conversion tool failed, timed out or produced garbage
    ExternalTool,
    /// Document store read/write failure or corrupt stored data
    Persistence,
    /// Requested bundle or asset does not exist
    NotFound,
    /// Local configuration problem (never produced by a request)
    Configuration,
}

/// Main error type for adbundle operations
#[derive(Error, Diagnostic, Debug)]
pub enum AdBundleError {
    // Request validation errors
    #[error("{message}")]
    #[diagnostic(code(adbundle::request::invalid))]
    InvalidRequest { message: String },

    #[error("Invalid session ID: '{session}'")]
    #[diagnostic(
        code(adbundle::request::invalid_session),
        help("Session IDs must be non-empty and must not contain path separators")
    )]
    InvalidSessionId { session: String },

    #[error("Invalid bundle ID: '{id}'")]
    #[diagnostic(code(adbundle::request::invalid_bundle_id))]
    InvalidBundleId { id: String },

    #[error("Invalid asset path: '{path}'")]
    #[diagnostic(
        code(adbundle::request::invalid_asset_path),
        help("Asset paths look like <bundle id>/css/style.css or <bundle id>/images/<name>")
    )]
    InvalidAssetPath { path: String },

    #[error("Invalid edit: {message}")]
    #[diagnostic(code(adbundle::request::invalid_edit))]
    InvalidEdit { message: String },

    // External tool errors
    #[error("Failed to launch converter '{program}': {reason}")]
    #[diagnostic(
        code(adbundle::convert::launch_failed),
        help("Check converter.program and converter.args in adbundle.yaml")
    )]
    ToolLaunchFailed { program: String, reason: String },

    #[error("{message}")]
    #[diagnostic(code(adbundle::convert::tool_failed))]
    ToolFailed { message: String },

    #[error("Converter timed out after {seconds} seconds")]
    #[diagnostic(
        code(adbundle::convert::timed_out),
        help("Raise converter.timeout_secs for very large archives")
    )]
    ToolTimedOut { seconds: u64 },

    #[error("Invalid JSON output: {output}")]
    #[diagnostic(code(adbundle::convert::invalid_output))]
    ToolOutputInvalid { output: String },

    #[error("{message}")]
    #[diagnostic(code(adbundle::convert::conversion_failed))]
    ConversionFailed { message: String },

    // Store errors
    #[error("Failed to read document '{id}': {reason}")]
    #[diagnostic(code(adbundle::store::read_failed))]
    StoreReadFailed { id: String, reason: String },

    #[error("Failed to write document '{id}': {reason}")]
    #[diagnostic(code(adbundle::store::write_failed))]
    StoreWriteFailed { id: String, reason: String },

    #[error("{failed} of {total} saves failed")]
    #[diagnostic(code(adbundle::store::saves_failed))]
    SavesFailed {
        failed: usize,
        total: usize,
        kind: ErrorKind,
    },

    #[error("Store operation failed: {message}")]
    #[diagnostic(code(adbundle::store::operation_failed))]
    StoreOperationFailed { message: String },

    #[error("Stored document '{id}' is corrupt: {reason}")]
    #[diagnostic(code(adbundle::store::corrupt_document))]
    DocumentCorrupt { id: String, reason: String },

    // Bundle lookup errors
    #[error("Document not found: {id}")]
    #[diagnostic(
        code(adbundle::bundle::not_found),
        help("Run 'adbundle list' to see stored bundles")
    )]
    BundleNotFound { id: String },

    #[error("Asset not found: {path}")]
    #[diagnostic(code(adbundle::bundle::asset_not_found))]
    AssetNotFound { path: String },

    #[error("No previews found for this session")]
    #[diagnostic(code(adbundle::bundle::no_previews))]
    NoPreviews { session: String },

    // Package errors
    #[error("Failed to decode image '{image}': {reason}")]
    #[diagnostic(code(adbundle::package::image_invalid))]
    PackageImageInvalid { image: String, reason: String },

    #[error("Failed to assemble package: {message}")]
    #[diagnostic(code(adbundle::package::assembly_failed))]
    PackageFailed { message: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(adbundle::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(adbundle::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(adbundle::fs::io_error))]
    IoError { message: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(adbundle::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(adbundle::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(adbundle::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Missing environment variable: {variable}")]
    #[diagnostic(
        code(adbundle::config::missing_credential),
        help(
            "Set all of FIREBASE_ADMIN_PROJECT_ID, FIREBASE_ADMIN_CLIENT_EMAIL and FIREBASE_ADMIN_PRIVATE_KEY, or none of them"
        )
    )]
    MissingCredential { variable: String },
}

impl AdBundleError {
    /// Classify this error for the request boundary
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest { .. }
            | Self::InvalidSessionId { .. }
            | Self::InvalidBundleId { .. }
            | Self::InvalidAssetPath { .. }
            | Self::InvalidEdit { .. } => ErrorKind::Validation,

            Self::ToolLaunchFailed { .. }
            | Self::ToolFailed { .. }
            | Self::ToolTimedOut { .. }
            | Self::ToolOutputInvalid { .. }
            | Self::ConversionFailed { .. } => ErrorKind::ExternalTool,

            Self::StoreReadFailed { .. }
            | Self::StoreWriteFailed { .. }
            | Self::StoreOperationFailed { .. }
            | Self::DocumentCorrupt { .. }
            | Self::PackageImageInvalid { .. }
            | Self::PackageFailed { .. }
            | Self::FileReadFailed { .. }
            | Self::FileWriteFailed { .. }
            | Self::IoError { .. } => ErrorKind::Persistence,

            Self::BundleNotFound { .. } | Self::AssetNotFound { .. } | Self::NoPreviews { .. } => {
                ErrorKind::NotFound
            }

            Self::SavesFailed { kind, .. } => *kind,

            Self::ConfigParseFailed { .. }
            | Self::ConfigReadFailed { .. }
            | Self::ConfigInvalid { .. }
            | Self::MissingCredential { .. } => ErrorKind::Configuration,
        }
    }
}

impl From<std::io::Error> for AdBundleError {
    fn from(err: std::io::Error) -> Self {
        AdBundleError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AdBundleError {
    fn from(err: serde_yaml::Error) -> Self {
        AdBundleError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AdBundleError {
    fn from(err: serde_json::Error) -> Self {
        AdBundleError::StoreOperationFailed {
            message: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for AdBundleError {
    fn from(err: zip::result::ZipError) -> Self {
        AdBundleError::PackageFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AdBundleError>;
