//! Spinner output while the synchronous workflows poll
//!
//! Wraps the library's progress events in an indicatif spinner on stderr so
//! stdout stays clean for the final record.

use cloudcenter_core::{OperationKind, PollState, ProgressCallback, ProgressEvent};
use indicatif::{ProgressBar, ProgressStyle};

/// A spinner fed by [`ProgressEvent`]s
pub struct WaitSpinner {
    pb: ProgressBar,
}

impl WaitSpinner {
    pub fn new(message: impl Into<String>) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed_precise}]")
        {
            pb.set_style(style);
        }
        pb.set_message(message.into());
        Self { pb }
    }

    /// Callback that updates this spinner
    pub fn callback(&self) -> ProgressCallback {
        let pb = self.pb.clone();
        Box::new(move |event: ProgressEvent| match &event {
            ProgressEvent::Started { operation, subject } => {
                pb.set_message(format!("{} {} started", operation, subject));
            }
            ProgressEvent::Polling {
                operation,
                subject,
                status,
                attempt,
                ..
            } => {
                pb.set_message(format!(
                    "{} {}: {} (check {})",
                    operation,
                    subject,
                    format_status(*operation, status),
                    attempt
                ));
            }
            ProgressEvent::Completed {
                operation,
                subject,
                status,
            } => {
                pb.finish_with_message(format!(
                    "{} {}: {}",
                    operation,
                    subject,
                    format_status(*operation, status)
                ));
            }
            ProgressEvent::Failed {
                operation,
                subject,
                error,
            } => {
                pb.finish_with_message(format!("{} {} failed: {}", operation, subject, error));
            }
        })
    }

    /// Clear the spinner if the workflow stopped before a terminal event
    pub fn finish(&self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

/// Decorate a status token with an icon for its classification
pub fn format_status(operation: OperationKind, status: &str) -> String {
    match operation.vocabulary().classify(status) {
        PollState::Succeeded => format!("\u{2713} {}", status),
        PollState::Failed => format!("\u{2717} {}", status),
        PollState::Pending => format!("\u{21bb} {}", status),
        PollState::Unknown => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status_icons() {
        assert_eq!(
            format_status(OperationKind::JobDeployment, "JobRunning"),
            "\u{2713} JobRunning"
        );
        assert_eq!(
            format_status(OperationKind::JobDeployment, "JobStarting"),
            "\u{21bb} JobStarting"
        );
        assert_eq!(
            format_status(OperationKind::JobDeletion, "FAILED"),
            "\u{2717} FAILED"
        );
        assert_eq!(format_status(OperationKind::JobUpdate, "JobOdd"), "JobOdd");
    }

    #[test]
    fn test_callback_finishes_spinner() {
        let spinner = WaitSpinner::new("waiting");
        let callback = spinner.callback();
        callback(ProgressEvent::Completed {
            operation: OperationKind::JobDeletion,
            subject: "12".to_string(),
            status: "SUCCESS".to_string(),
        });
        assert!(spinner.pb.is_finished());
        spinner.finish();
    }
}
