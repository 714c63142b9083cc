//! External conversion tool invocation
//!
//! The tool is an opaque batch command: it receives one archive path as its
//! last argument and prints a JSON document (see [`ConversionResult`]) on
//! stdout. A non-zero exit, a timeout or unparsable stdout is a hard failure;
//! nothing is retried and no partial output is salvaged.

use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use serde_json::Value;
use tokio::process::Command;

use crate::config::ConverterSettings;
use crate::domain::ConversionResult;
use crate::error::{Result, convert};

#[cfg(test)]
mod tests;

/// How to run the conversion tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converter {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Converter {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_settings(settings: &ConverterSettings) -> Self {
        Self::new(
            settings.program.clone(),
            settings.args.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the tool on `archive` and parse its output
    pub async fn run(&self, archive: &Path) -> Result<ConversionResult> {
        tracing::info!(
            program = %self.program,
            archive = %archive.display(),
            "running converter"
        );

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(archive)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(convert::launch_failed(&self.program, e.to_string())),
            Err(_) => {
                tracing::error!(seconds = self.timeout.as_secs(), "converter timed out");
                return Err(convert::timed_out(self.timeout.as_secs()));
            }
        };

        interpret_output(&output)
    }
}

/// Turn a finished process into a conversion result
fn interpret_output(output: &Output) -> Result<ConversionResult> {
    let stdout = String::from_utf8_lossy(&output.stdout);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = failure_message(stderr.trim(), &stdout)
            .unwrap_or_else(|| format!("Converter exited with {}", output.status));
        tracing::error!(status = %output.status, "converter failed: {message}");
        return Err(convert::tool_failed(message));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        tracing::debug!("converter stderr: {}", stderr.trim());
    }

    ConversionResult::from_json(&stdout)
}

/// Best available failure text: stderr, else the `error` field of stdout JSON
fn failure_message(stderr: &str, stdout: &str) -> Option<String> {
    if !stderr.is_empty() {
        return Some(stderr.to_string());
    }
    serde_json::from_str::<Value>(stdout.trim())
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(ToString::to_string))
        .filter(|message| !message.is_empty())
}
