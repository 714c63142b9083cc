//! Bundle lookup errors

use super::AdBundleError;

/// Creates a bundle not found error
pub fn not_found(id: impl Into<String>) -> AdBundleError {
    AdBundleError::BundleNotFound { id: id.into() }
}

/// Creates an asset not found error
pub fn asset_not_found(path: impl Into<String>) -> AdBundleError {
    AdBundleError::AssetNotFound { path: path.into() }
}

/// Creates a no previews error for a session without bundles
pub fn no_previews(session: impl Into<String>) -> AdBundleError {
    AdBundleError::NoPreviews {
        session: session.into(),
    }
}
