//! External conversion tool errors

use super::AdBundleError;

pub fn launch_failed(program: impl Into<String>, reason: impl Into<String>) -> AdBundleError {
    AdBundleError::ToolLaunchFailed {
        program: program.into(),
        reason: reason.into(),
    }
}

/// Creates a tool failure error; the message is passed through verbatim
pub fn tool_failed(message: impl Into<String>) -> AdBundleError {
    AdBundleError::ToolFailed {
        message: message.into(),
    }
}

pub fn timed_out(seconds: u64) -> AdBundleError {
    AdBundleError::ToolTimedOut { seconds }
}

pub fn invalid_output(output: impl Into<String>) -> AdBundleError {
    AdBundleError::ToolOutputInvalid {
        output: output.into(),
    }
}

/// Creates a conversion failure error (tool reported `success: false`)
pub fn conversion_failed(message: impl Into<String>) -> AdBundleError {
    AdBundleError::ConversionFailed {
        message: message.into(),
    }
}
