//! Configuration errors

use super::AdBundleError;

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> AdBundleError {
    AdBundleError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> AdBundleError {
    AdBundleError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> AdBundleError {
    AdBundleError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a missing credential error
pub fn missing_credential(variable: impl Into<String>) -> AdBundleError {
    AdBundleError::MissingCredential {
        variable: variable.into(),
    }
}
