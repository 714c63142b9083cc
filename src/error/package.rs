//! Package assembly errors

use super::AdBundleError;

/// Creates an image decode error naming the failing image
pub fn image_invalid(image: impl Into<String>, reason: impl Into<String>) -> AdBundleError {
    AdBundleError::PackageImageInvalid {
        image: image.into(),
        reason: reason.into(),
    }
}

pub fn assembly_failed(message: impl Into<String>) -> AdBundleError {
    AdBundleError::PackageFailed {
        message: message.into(),
    }
}
