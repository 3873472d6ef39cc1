//! Error types for ccctl
//!
//! Library errors are mapped into a small set of user-facing categories, each
//! with suggestions for what to try next.

use cloudcenter_core::{ConfigError, CoreError};
use colored::Colorize;
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// ```text
/// error: Profile 'lab' not found
///
///   tip: List available profiles: ccctl profile list
/// ```
pub struct CliDiagnostic {
    message: String,
    tips: Vec<String>,
}

impl CliDiagnostic {
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            tips: Vec::new(),
        }
    }

    pub fn tip(mut self, description: &str) -> Self {
        self.tips.push(description.to_string());
        self
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        for description in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
        }
    }
}

/// Main error type for the ccctl application
#[derive(Error, Debug)]
pub enum CcctlError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No profile configured. Use 'ccctl profile set' to configure a profile.")]
    NoProfileConfigured,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("File error for '{path}': {message}")]
    FileError { path: String, message: String },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Timeout: {message}")]
    Timeout { message: String },

    #[error("{message}")]
    OperationFailed { message: String },

    /// The request was accepted but finishes only once conditions are met
    #[error("{message}")]
    Accepted { message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },
}

/// Result type for ccctl operations
pub type Result<T> = std::result::Result<T, CcctlError>;

impl CcctlError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            CcctlError::ProfileNotFound { name } => vec![
                "List available profiles: ccctl profile list".to_string(),
                format!(
                    "Create profile '{}': ccctl profile set {} --url <url> --username <user> --api-key <key>",
                    name, name
                ),
            ],
            CcctlError::NoProfileConfigured => vec![
                "Create a profile: ccctl profile set <name> --url <url> --username <user> --api-key <key>".to_string(),
                "Or set CLOUDCENTER_URL, CLOUDCENTER_USERNAME and CLOUDCENTER_API_KEY".to_string(),
            ],
            CcctlError::AuthenticationFailed { .. } => vec![
                "Check your credentials: ccctl profile show <profile>".to_string(),
                "Verify the username and API key on the manager's user page".to_string(),
            ],
            CcctlError::ConnectionError { message }
                if message.contains("certificate") || message.contains("SSL") =>
            {
                vec![
                    "For self-signed certificates, recreate the profile with --insecure".to_string(),
                    "Check that the server URL is correct and reachable".to_string(),
                ]
            }
            CcctlError::ConnectionError { .. } => vec![
                "Check network connectivity".to_string(),
                "Verify the server URL is correct: ccctl profile show <profile>".to_string(),
            ],
            CcctlError::NotFound { .. } => vec![
                "Verify the resource ID is correct".to_string(),
                "List available resources to find the correct ID".to_string(),
            ],
            CcctlError::Timeout { .. } => vec![
                "The operation may still be running; check it later with 'ccctl job get' or 'ccctl operation get'".to_string(),
                "Increase the wait with --timeout <seconds>".to_string(),
            ],
            CcctlError::InvalidInput { .. } => vec![
                "Check the command syntax: ccctl <command> --help".to_string(),
            ],
            CcctlError::FileError { path, .. } => vec![
                format!("Check that file exists: {}", path),
            ],
            _ => vec![],
        }
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        let mut diag = CliDiagnostic::error(&self.to_string());

        for suggestion in self.suggestions() {
            diag = diag.tip(&suggestion);
        }

        diag.print();
    }
}

impl From<CoreError> for CcctlError {
    fn from(err: CoreError) -> Self {
        if err.is_unauthorized() {
            return CcctlError::AuthenticationFailed {
                message: err.to_string(),
            };
        }
        if err.is_timeout() {
            return CcctlError::Timeout {
                message: err.to_string(),
            };
        }
        match err {
            CoreError::Transport(e) => CcctlError::ConnectionError {
                message: e.to_string(),
            },
            CoreError::Validation(message) => CcctlError::InvalidInput { message },
            CoreError::NotFound(message) => CcctlError::NotFound { message },
            CoreError::DeletionAccepted(message) => CcctlError::Accepted { message },
            CoreError::Config(e) => CcctlError::from(e),
            e @ (CoreError::OperationFailed { .. }
            | CoreError::UnknownStatus { .. }
            | CoreError::Cancelled { .. }) => CcctlError::OperationFailed {
                message: e.to_string(),
            },
            e if e.is_not_found() => CcctlError::NotFound {
                message: e.remote_msg().unwrap_or_else(|| e.to_string()),
            },
            e => CcctlError::ApiError {
                message: e.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CcctlError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name } => CcctlError::ProfileNotFound { name },
            ConfigError::NoProfiles { .. } => CcctlError::NoProfileConfigured,
            e => CcctlError::Configuration(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for CcctlError {
    fn from(err: serde_json::Error) -> Self {
        CcctlError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<std::io::Error> for CcctlError {
    fn from(err: std::io::Error) -> Self {
        CcctlError::OutputError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<anyhow::Error> for CcctlError {
    fn from(err: anyhow::Error) -> Self {
        CcctlError::Configuration(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudcenter_core::OperationKind;

    #[test]
    fn test_core_error_mapping() {
        let unauthorized = CcctlError::from(CoreError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        });
        assert!(matches!(unauthorized, CcctlError::AuthenticationFailed { .. }));

        let missing = CcctlError::from(CoreError::Api {
            status: 404,
            message: r#"{"msg":"Job 3 not found"}"#.to_string(),
        });
        assert_eq!(missing.to_string(), "Not found: Job 3 not found");

        let failed = CcctlError::from(CoreError::OperationFailed {
            operation: OperationKind::JobDeployment,
            status: "JobError".to_string(),
            message: Some("quota".to_string()),
        });
        assert_eq!(failed.to_string(), "Job deployment failed (status JobError): quota");

        let invalid = CcctlError::from(CoreError::Validation("Tenant.name is missing".into()));
        assert!(matches!(invalid, CcctlError::InvalidInput { .. }));
    }

    #[test]
    fn test_config_error_mapping() {
        let err = CcctlError::from(ConfigError::ProfileNotFound {
            name: "lab".to_string(),
        });
        assert!(matches!(err, CcctlError::ProfileNotFound { ref name } if name == "lab"));
        assert!(!err.suggestions().is_empty());
    }
}
