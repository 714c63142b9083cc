//! Spinner for long-running conversions

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while the external converter runs
pub struct ConversionSpinner {
    pb: ProgressBar,
}

impl ConversionSpinner {
    /// Start a spinner with `message`; hidden when stderr is not a terminal
    pub fn start(message: impl Into<String>) -> Self {
        let pb = if console::Term::stderr().is_term() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.pb.set_message(message.into());
    }

    /// Clear the spinner on success
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Leave the last message visible on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}
