//! Request validation errors

use super::AdBundleError;

/// Creates an invalid request error carrying a user-facing message
pub fn invalid(message: impl Into<String>) -> AdBundleError {
    AdBundleError::InvalidRequest {
        message: message.into(),
    }
}

/// Creates an invalid session ID error
pub fn invalid_session(session: impl Into<String>) -> AdBundleError {
    AdBundleError::InvalidSessionId {
        session: session.into(),
    }
}

/// Creates an invalid bundle ID error
pub fn invalid_bundle_id(id: impl Into<String>) -> AdBundleError {
    AdBundleError::InvalidBundleId { id: id.into() }
}

/// Creates an invalid asset path error
pub fn invalid_asset_path(path: impl Into<String>) -> AdBundleError {
    AdBundleError::InvalidAssetPath { path: path.into() }
}

/// Creates an invalid edit error
pub fn invalid_edit(message: impl Into<String>) -> AdBundleError {
    AdBundleError::InvalidEdit {
        message: message.into(),
    }
}
