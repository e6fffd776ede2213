//! Progress indicator utilities for the splunkd CLI.
//!
//! Responsibilities:
//! - Provide a spinner that follows poll steps, and a generic spinner for
//!   one-shot operations (restart, reload).
//! - Ensure ALL progress output is written to STDERR (never stdout), so machine-readable
//!   command output (json/table/csv) is not contaminated.
//! - Allow global suppression via a caller-provided `enabled` boolean (driven by `--quiet`).
//!
//! Non-responsibilities:
//! - This module does not decide *when* progress should be shown; callers do.
//! - This module does not print command results; stdout remains reserved for results.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use splunkd_client::{PollObserver, PollStep};

/// An indefinite spinner for short/unknown-duration operations.
///
/// Always draws to STDERR; no-op when disabled.
pub(crate) struct Spinner {
    label: String,
    pb: Option<ProgressBar>,
}

impl Spinner {
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        let label = label.into();

        if !enabled {
            return Self { label, pb: None };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(label.clone());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            label,
            pb: Some(pb),
        }
    }

    pub(crate) fn set_message(&self, message: impl Into<String>) {
        if let Some(pb) = &self.pb {
            pb.set_message(message.into());
        }
    }

    /// Finish the spinner with a stable message (on STDERR).
    pub(crate) fn finish(&self) {
        let Some(pb) = &self.pb else {
            return;
        };

        pb.finish_with_message(format!("{} done", self.label));
    }

    /// Remove the spinner line without leaving a message.
    pub(crate) fn clear(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        // An error path that never finished: clear the line so the error prints cleanly.
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}

/// Spinner that shows `[n/9] Polling ...` for each poll step.
pub(crate) struct PollProgress {
    spinner: Spinner,
}

impl PollProgress {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            spinner: Spinner::new(enabled, "Polling"),
        }
    }

    pub(crate) fn finish(&self) {
        self.spinner.finish();
    }
}

pub(crate) fn step_label(step: PollStep) -> String {
    format!("[{}/{}] {}", step.ordinal(), PollStep::ALL.len(), step.message())
}

impl PollObserver for PollProgress {
    fn on_step(&mut self, step: PollStep) {
        self.spinner.set_message(step_label(step));
    }
}
