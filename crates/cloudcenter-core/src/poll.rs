//! Synchronous operation polling
//!
//! Long-running CloudCenter operations (job deployment, cloud account
//! creation, deletions) are accepted immediately and finish later. This
//! module re-reads their status until it reaches a terminal state, with
//! optional progress callbacks for UI updates.
//!
//! Two status vocabularies exist on the remote side:
//!
//! * operation status records use `RUNNING` while pending and `SUCCESS` on
//!   success; any other token is a failure.
//! * jobs use a closed set of `Job*` tokens split into pending, success and
//!   failure groups. A token outside all three groups is rejected.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{CoreError, Result};

/// Job tokens that mean "keep waiting"
pub const JOB_PENDING: &[&str] = &["JobStarting", "JobSubmitted", "JobInProgress", "JobResuming"];

/// Job tokens that mean the job reached a usable state
pub const JOB_SUCCESS: &[&str] = &["JobRunning", "JobDeployed", "JobFinished", "JobStopped"];

/// Job tokens that mean the job will not get there
pub const JOB_FAILURE: &[&str] = &[
    "JobCanceled",
    "JobCancelling",
    "JobError",
    "JobStoppingError",
    "JobRejected",
    "JobSuspending",
    "JobSuspended",
];

/// Operation status token while the operation is running
pub const OPERATION_RUNNING: &str = "RUNNING";

/// Operation status token on success
pub const OPERATION_SUCCESS: &str = "SUCCESS";

/// Classification of a single status read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Pending,
    Succeeded,
    Failed,
    /// Token outside a closed vocabulary
    Unknown,
}

/// Which status vocabulary an operation reports in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusVocabulary {
    /// `Job*` tokens reported on the job record
    Job,
    /// `RUNNING` / `SUCCESS` reported on operation status records
    Operation,
}

impl StatusVocabulary {
    /// Classify a status token. Matching is exact and case-sensitive.
    pub fn classify(self, status: &str) -> PollState {
        match self {
            StatusVocabulary::Operation => match status {
                OPERATION_RUNNING => PollState::Pending,
                OPERATION_SUCCESS => PollState::Succeeded,
                _ => PollState::Failed,
            },
            StatusVocabulary::Job => {
                if JOB_PENDING.contains(&status) {
                    PollState::Pending
                } else if JOB_SUCCESS.contains(&status) {
                    PollState::Succeeded
                } else if JOB_FAILURE.contains(&status) {
                    PollState::Failed
                } else {
                    PollState::Unknown
                }
            }
        }
    }
}

/// The long-running operations that can be waited on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    JobDeployment,
    JobUpdate,
    JobDeletion,
    CloudAccountCreation,
    CloudAccountUpdate,
    TenantDeletion,
    /// Any other operation followed by its operation id
    Operation,
}

impl OperationKind {
    /// Human readable label used in errors and progress output
    pub fn label(self) -> &'static str {
        match self {
            OperationKind::JobDeployment => "Job deployment",
            OperationKind::JobUpdate => "Job update",
            OperationKind::JobDeletion => "Job deletion",
            OperationKind::CloudAccountCreation => "Cloud Account creation",
            OperationKind::CloudAccountUpdate => "Cloud Account update",
            OperationKind::TenantDeletion => "Tenant deletion",
            OperationKind::Operation => "Operation",
        }
    }

    /// Vocabulary the status reads for this operation are expressed in
    pub fn vocabulary(self) -> StatusVocabulary {
        match self {
            OperationKind::JobDeployment | OperationKind::JobUpdate => StatusVocabulary::Job,
            _ => StatusVocabulary::Operation,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A record whose status can be polled
pub trait Pollable {
    /// Current status token, if the record carries one
    fn status(&self) -> Option<&str>;

    /// Free-form message accompanying the status
    fn status_message(&self) -> Option<&str>;
}

/// Bounds for a polling loop
///
/// The default waits 10 seconds between reads and gives up after 10 minutes.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Wait between consecutive status reads
    pub interval: Duration,
    /// Give up once this much time has passed
    pub timeout: Option<Duration>,
    /// Give up after this many status reads
    pub max_attempts: Option<u32>,
    /// Stop as soon as this token is cancelled
    pub cancel: Option<CancellationToken>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            timeout: Some(Duration::from_secs(600)),
            max_attempts: None,
            cancel: None,
        }
    }
}

impl PollOptions {
    /// Poll forever at a fixed interval until a terminal status arrives
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            timeout: None,
            max_attempts: None,
            cancel: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

/// Progress events emitted while waiting on an operation
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Waiting has begun
    Started {
        operation: OperationKind,
        subject: String,
    },
    /// One status read completed
    Polling {
        operation: OperationKind,
        subject: String,
        status: String,
        attempt: u32,
        elapsed: Duration,
    },
    /// Terminal success
    Completed {
        operation: OperationKind,
        subject: String,
        status: String,
    },
    /// Terminal failure, timeout or cancellation
    Failed {
        operation: OperationKind,
        subject: String,
        error: String,
    },
}

/// Callback type for progress updates
///
/// The CLI uses this to drive its spinner.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Read `fetch` until the record reaches a terminal status.
///
/// The first read happens immediately; later reads are spaced by
/// `options.interval`. A failed read aborts the loop and its error is
/// returned unchanged.
///
/// # Example
///
/// ```rust,ignore
/// use cloudcenter_core::{OperationKind, PollOptions, poll_until_terminal};
///
/// let handler = JobHandler::new(client.clone());
/// let job = poll_until_terminal(
///     OperationKind::JobDeployment,
///     &job_id,
///     &PollOptions::default(),
///     None,
///     || handler.get(&job_id),
/// )
/// .await?;
/// ```
pub async fn poll_until_terminal<T, F, Fut>(
    operation: OperationKind,
    subject: &str,
    options: &PollOptions,
    on_progress: Option<ProgressCallback>,
    mut fetch: F,
) -> Result<T>
where
    T: Pollable,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let vocabulary = operation.vocabulary();
    let mut attempt: u32 = 0;

    emit(
        &on_progress,
        ProgressEvent::Started {
            operation,
            subject: subject.to_string(),
        },
    );

    loop {
        if options.is_cancelled() {
            return Err(fail(&on_progress, subject, CoreError::Cancelled { operation }));
        }

        let elapsed = start.elapsed();
        if let Some(timeout) = options.timeout
            && elapsed > timeout
        {
            return Err(fail(
                &on_progress,
                subject,
                CoreError::Timeout { operation, elapsed },
            ));
        }

        attempt += 1;
        let record = fetch().await.inspect_err(|e| {
            emit(
                &on_progress,
                ProgressEvent::Failed {
                    operation,
                    subject: subject.to_string(),
                    error: e.to_string(),
                },
            )
        })?;
        let status = record.status().unwrap_or_default().to_string();

        debug!(%operation, subject, %status, attempt, "status read");
        emit(
            &on_progress,
            ProgressEvent::Polling {
                operation,
                subject: subject.to_string(),
                status: status.clone(),
                attempt,
                elapsed: start.elapsed(),
            },
        );

        match vocabulary.classify(&status) {
            PollState::Succeeded => {
                info!(%operation, subject, %status, attempt, "operation completed");
                emit(
                    &on_progress,
                    ProgressEvent::Completed {
                        operation,
                        subject: subject.to_string(),
                        status,
                    },
                );
                return Ok(record);
            }
            PollState::Failed => {
                info!(%operation, subject, %status, "operation failed");
                let message = record
                    .status_message()
                    .filter(|m| !m.is_empty())
                    .map(str::to_string);
                return Err(fail(
                    &on_progress,
                    subject,
                    CoreError::OperationFailed {
                        operation,
                        status,
                        message,
                    },
                ));
            }
            PollState::Unknown => {
                return Err(fail(
                    &on_progress,
                    subject,
                    CoreError::UnknownStatus { operation, status },
                ));
            }
            PollState::Pending => {}
        }

        if let Some(max) = options.max_attempts
            && attempt >= max
        {
            return Err(fail(
                &on_progress,
                subject,
                CoreError::Timeout {
                    operation,
                    elapsed: start.elapsed(),
                },
            ));
        }

        match &options.cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => {
                        return Err(fail(&on_progress, subject, CoreError::Cancelled { operation }));
                    }
                    _ = tokio::time::sleep(options.interval) => {}
                }
            }
            None => tokio::time::sleep(options.interval).await,
        }
    }
}

fn fail(callback: &Option<ProgressCallback>, subject: &str, error: CoreError) -> CoreError {
    let operation = match &error {
        CoreError::OperationFailed { operation, .. }
        | CoreError::UnknownStatus { operation, .. }
        | CoreError::Timeout { operation, .. }
        | CoreError::Cancelled { operation } => *operation,
        _ => return error,
    };
    emit(
        callback,
        ProgressEvent::Failed {
            operation,
            subject: subject.to_string(),
            error: error.to_string(),
        },
    );
    error
}

/// Helper to emit progress events
pub(crate) fn emit(callback: &Option<ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}
