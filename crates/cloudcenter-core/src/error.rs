//! Unified error handling for cloudcenter-core
//!
//! Every failure path in the library surfaces as a [`CoreError`]. API errors
//! keep the raw response body, and polling failures keep the last status and
//! message the remote side reported.
//!
//! # Example
//!
//! ```rust
//! use cloudcenter_core::CoreError;
//!
//! fn handle_error(err: CoreError) {
//!     if err.is_not_found() {
//!         println!("Resource not found");
//!     } else if err.is_retryable() {
//!         println!("Temporary error, can retry");
//!     }
//! }
//!
//! let err = CoreError::Api {
//!     status: 404,
//!     message: r#"{"msg":"Job 12 not found"}"#.to_string(),
//! };
//! assert!(err.is_not_found());
//! assert_eq!(err.remote_msg().as_deref(), Some("Job 12 not found"));
//! ```

use std::time::Duration;
use thiserror::Error;

use crate::config::ConfigError;
use crate::poll::OperationKind;

/// Core error type for every CloudCenter operation
#[derive(Error, Debug)]
pub enum CoreError {
    /// Connection or body-read failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status; `message` is the raw response body
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected JSON shape
    #[error("Failed to decode response from {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response decoded but lacked something the caller needs
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Missing identifier or required field, raised before any request is sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// A polled operation reached a terminal failure status
    #[error("{operation} failed (status {status}){}", detail(.message))]
    OperationFailed {
        operation: OperationKind,
        status: String,
        message: Option<String>,
    },

    /// A polled operation reported a status outside its vocabulary
    #[error("{operation} reported unknown status '{status}'")]
    UnknownStatus {
        operation: OperationKind,
        status: String,
    },

    /// Polling gave up after the configured timeout or attempt bound
    #[error("{operation} timed out after {elapsed:?}")]
    Timeout {
        operation: OperationKind,
        elapsed: Duration,
    },

    /// Polling was cancelled by the caller
    #[error("{operation} was cancelled")]
    Cancelled { operation: OperationKind },

    /// A resolving lookup found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Tenant deletion was queued rather than completed
    #[error("{0}")]
    DeletionAccepted(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

fn detail(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(": {}", m),
        _ => String::new(),
    }
}

impl CoreError {
    /// HTTP status code for API errors
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CoreError::Api { status, .. } => Some(*status),
            CoreError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Extract the `msg` field from a JSON error body, if the body is JSON
    ///
    /// The remote API usually answers errors with `{"msg": "..."}` but this is
    /// not guaranteed, so a non-JSON body yields `None`.
    #[must_use]
    pub fn remote_msg(&self) -> Option<String> {
        match self {
            CoreError::Api { message, .. } => serde_json::from_str::<serde_json::Value>(message)
                .ok()
                .and_then(|v| v.get("msg").and_then(|m| m.as_str()).map(str::to_string)),
            _ => None,
        }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_)) || self.status_code() == Some(404)
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401) | Some(403))
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }

    /// Returns true if this is a timeout error
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            CoreError::Transport(e) => e.is_timeout(),
            CoreError::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Returns true if this is a rate limiting error (429)
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }

    /// Returns true if this is a conflict/precondition error (409/412)
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self.status_code(), Some(409) | Some(412))
    }

    /// Returns true if this is a bad request error (400)
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(self, CoreError::Validation(_)) || self.status_code() == Some(400)
    }

    /// Returns true if the failing operation reached a terminal status
    #[must_use]
    pub fn is_operation_failure(&self) -> bool {
        matches!(
            self,
            CoreError::OperationFailed { .. } | CoreError::UnknownStatus { .. }
        )
    }

    /// Returns true if this error is potentially retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            CoreError::Transport(e) => e.is_timeout() || e.is_connect(),
            CoreError::Timeout { .. } => true,
            _ => self.is_server_error() || self.is_rate_limited(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, message: &str) -> CoreError {
        CoreError::Api {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_api_error_helpers() {
        assert!(api(404, "missing").is_not_found());
        assert!(api(401, "").is_unauthorized());
        assert!(api(403, "").is_unauthorized());
        assert!(api(503, "").is_server_error());
        assert!(api(503, "").is_retryable());
        assert!(api(429, "").is_rate_limited());
        assert!(api(429, "").is_retryable());
        assert!(api(409, "").is_conflict());
        assert!(api(412, "").is_conflict());
        assert!(api(400, "").is_bad_request());
        assert!(!api(400, "").is_retryable());
    }

    #[test]
    fn test_api_error_keeps_raw_body() {
        let err = api(500, "<html>Internal Server Error</html>");
        assert!(err.to_string().contains("<html>Internal Server Error</html>"));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn test_remote_msg_from_json_body() {
        let err = api(400, r#"{"msg":"Delete tenant request accepted","code":1}"#);
        assert_eq!(
            err.remote_msg().as_deref(),
            Some("Delete tenant request accepted")
        );
    }

    #[test]
    fn test_remote_msg_from_non_json_body() {
        assert!(api(502, "Bad Gateway").remote_msg().is_none());
        assert!(api(400, r#"{"error":"no msg field"}"#).remote_msg().is_none());
        assert!(CoreError::Validation("x".into()).remote_msg().is_none());
    }

    #[test]
    fn test_operation_failed_display_keeps_detail() {
        let err = CoreError::OperationFailed {
            operation: OperationKind::JobDeployment,
            status: "JobError".to_string(),
            message: Some("Node launch failed".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Job deployment failed (status JobError): Node launch failed"
        );
        assert!(err.is_operation_failure());

        let bare = CoreError::OperationFailed {
            operation: OperationKind::CloudAccountCreation,
            status: "FAILED".to_string(),
            message: None,
        };
        assert_eq!(
            bare.to_string(),
            "Cloud Account creation failed (status FAILED)"
        );
    }

    #[test]
    fn test_poll_timeout() {
        let err = CoreError::Timeout {
            operation: OperationKind::JobUpdate,
            elapsed: Duration::from_secs(600),
        };
        assert!(err.is_timeout());
        assert!(err.is_retryable());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_validation() {
        let err = CoreError::Validation("Tenant.id is missing".to_string());
        assert!(err.is_bad_request());
        assert!(!err.is_retryable());
        assert!(err.status_code().is_none());
    }

    #[test]
    fn test_not_found_lookup() {
        let err = CoreError::NotFound("BUNDLE NOT FOUND".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_operation_failure());
    }
}
