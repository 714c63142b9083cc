//! Document store errors

use super::{AdBundleError, ErrorKind};

/// Creates a store read failed error
pub fn read_failed(id: impl Into<String>, reason: impl Into<String>) -> AdBundleError {
    AdBundleError::StoreReadFailed {
        id: id.into(),
        reason: reason.into(),
    }
}

/// Creates a store write failed error
pub fn write_failed(id: impl Into<String>, reason: impl Into<String>) -> AdBundleError {
    AdBundleError::StoreWriteFailed {
        id: id.into(),
        reason: reason.into(),
    }
}

/// Creates a batch save error classed like its first failure
pub fn saves_failed(failed: usize, total: usize, kind: ErrorKind) -> AdBundleError {
    AdBundleError::SavesFailed {
        failed,
        total,
        kind,
    }
}

/// Creates a store operation failed error
pub fn operation_failed(message: impl Into<String>) -> AdBundleError {
    AdBundleError::StoreOperationFailed {
        message: message.into(),
    }
}

/// Creates a corrupt document error
pub fn corrupt(id: impl Into<String>, reason: impl Into<String>) -> AdBundleError {
    AdBundleError::DocumentCorrupt {
        id: id.into(),
        reason: reason.into(),
    }
}
