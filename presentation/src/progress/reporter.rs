//! Spinner shown while a question is being answered

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Reports progress of one question with a terminal spinner
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Start a spinner with the given message
    pub fn spinner(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// A reporter that draws nothing (quiet mode and tests)
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Remove the spinner from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
