//! CLI structure and command definitions
//!
//! Two layers:
//! 1. Raw API access (`api` commands)
//! 2. Resource commands (`tenant`, `job`, `account`, ...) that use the typed
//!    handlers and, for long-running operations, wait for completion

use clap::{Parser, Subcommand};

pub mod resources;

pub use resources::*;

/// CloudCenter management CLI
#[derive(Parser, Debug)]
#[command(name = "ccctl")]
#[command(version, about = "Command line client for the CloudCenter management API")]
#[command(long_about = "
Command line client for the CloudCenter management API

EXAMPLES:
    # Set up a profile
    ccctl profile set lab --url https://ccm.example.com --username cliqradmin --api-key KEY

    # List jobs as a table
    ccctl job list -o table

    # Deploy a job and wait until it is running
    ccctl job deploy --data @job.json

    # Filter output with JMESPath
    ccctl tenant list -q '[].{id: id, name: name}'

    # Direct API access
    ccctl api get /v1/users

For more help on a specific command, run:
    ccctl <command> --help
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "CCCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "CCCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// JMESPath query to filter output
    #[arg(long, short = 'q', global = true)]
    pub query: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table on a terminal, JSON when piped
    Auto,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Human-readable table format
    Table,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Raw API access - direct REST endpoint calls
    #[command(name = "api")]
    #[command(after_help = "EXAMPLES:
    # GET request
    ccctl api get /v1/tenants

    # POST request with JSON data
    ccctl api post /v1/tenants --data '{\"name\":\"acme\"}'

    # POST request from file
    ccctl api post /v2/jobs --data @job.json
")]
    Api {
        /// HTTP method
        #[arg(value_parser = parse_http_method)]
        method: HttpMethod,

        /// API endpoint path (e.g., /v1/users)
        path: String,

        /// Request body (JSON string or @file)
        #[arg(long)]
        data: Option<String>,
    },

    /// Profile management
    #[command(subcommand, visible_alias = "prof")]
    #[command(after_help = "EXAMPLES:
    # Create a profile
    ccctl profile set lab --url https://ccm.lab --username admin --api-key KEY

    # List all profiles
    ccctl profile list

    # Make a profile the default
    ccctl profile default lab

    # Check every profile, including a test request
    ccctl profile validate --connect
")]
    Profile(ProfileCommands),

    /// Tenant management
    #[command(subcommand)]
    Tenant(TenantCommands),

    /// Users
    #[command(subcommand)]
    User(UserCommands),

    /// Clouds, regions and instance types
    #[command(subcommand)]
    Cloud(CloudCommands),

    /// Cloud accounts
    #[command(subcommand)]
    Account(AccountCommands),

    /// Job deployment and lifecycle
    #[command(subcommand)]
    Job(JobCommands),

    /// Long-running operation status
    #[command(subcommand, visible_alias = "op")]
    Operation(OperationCommands),

    /// Application profiles
    #[command(subcommand)]
    App(AppCommands),

    /// Tenant bundles
    #[command(subcommand)]
    Bundle(BundleCommands),

    /// Virtual machines and their costs
    #[command(subcommand)]
    Vm(VmCommands),

    /// Version information
    #[command(visible_alias = "ver")]
    Version,

    /// Generate shell completions
    #[command(visible_alias = "comp")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    Elvish,
}

/// HTTP methods for raw API access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Parse HTTP method case-insensitively
fn parse_http_method(s: &str) -> Result<HttpMethod, String> {
    match s.to_lowercase().as_str() {
        "get" => Ok(HttpMethod::Get),
        "post" => Ok(HttpMethod::Post),
        "put" => Ok(HttpMethod::Put),
        "delete" => Ok(HttpMethod::Delete),
        _ => Err(format!(
            "invalid HTTP method: {} (valid: get, post, put, delete)",
            s
        )),
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// Profile management commands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List all configured profiles
    #[command(visible_alias = "ls")]
    List,

    /// Show the path to the configuration file
    Path,

    /// Show details of a specific profile
    #[command(visible_alias = "get")]
    Show {
        /// Profile name to show
        name: String,
    },

    /// Set or create a profile
    #[command(visible_alias = "add")]
    Set {
        /// Profile name
        name: String,

        /// Manager base URL
        #[arg(long)]
        url: String,

        /// Username for basic auth
        #[arg(long)]
        username: String,

        /// API key for basic auth
        #[arg(long)]
        api_key: String,

        /// Skip TLS certificate validation
        #[arg(long)]
        insecure: bool,

        /// Seconds between status reads when waiting
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Give up waiting after this many seconds
        #[arg(long)]
        poll_timeout: Option<u64>,

        /// Store the API key in the OS keyring instead of the config file
        #[cfg(feature = "secure-storage")]
        #[arg(long)]
        use_keyring: bool,
    },

    /// Remove a profile
    #[command(visible_alias = "rm")]
    Remove {
        /// Profile name to remove
        name: String,
    },

    /// Set the default profile
    Default {
        /// Profile name
        name: String,
    },

    /// Validate configuration file and profiles
    #[command(visible_alias = "check")]
    Validate {
        /// Also send a test request for each profile
        #[arg(long)]
        connect: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_http_method() {
        assert_eq!(parse_http_method("GET").unwrap(), HttpMethod::Get);
        assert_eq!(parse_http_method("delete").unwrap(), HttpMethod::Delete);
        assert!(parse_http_method("patch").is_err());
    }

    #[test]
    fn test_job_deploy_wait_flags() {
        let cli = Cli::try_parse_from([
            "ccctl", "job", "deploy", "--data", "{}", "--interval", "2", "--timeout", "60",
        ])
        .unwrap();
        match cli.command {
            Commands::Job(JobCommands::Deploy { wait, .. }) => {
                assert!(!wait.no_wait);
                assert_eq!(wait.interval, Some(2));
                assert_eq!(wait.timeout, Some(60));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_async_conflicts_with_wait_bounds() {
        let result = Cli::try_parse_from([
            "ccctl", "job", "delete", "12", "--async", "--timeout", "5",
        ]);
        assert!(result.is_err());
    }
}
