//! Resource command definitions

use clap::{Args, Subcommand};

/// Controls how long-running commands wait for completion
#[derive(Args, Debug, Clone, Default)]
pub struct WaitArgs {
    /// Return as soon as the request is accepted instead of waiting
    #[arg(long = "async", visible_alias = "no-wait")]
    pub no_wait: bool,

    /// Seconds between status reads (profile or library default if unset)
    #[arg(long, conflicts_with = "no_wait")]
    pub interval: Option<u64>,

    /// Give up after this many seconds (profile or library default if unset)
    #[arg(long, conflicts_with = "no_wait")]
    pub timeout: Option<u64>,
}

/// Tenant commands
#[derive(Subcommand, Debug)]
pub enum TenantCommands {
    /// List tenants
    #[command(visible_alias = "ls")]
    List,

    /// Get one tenant
    Get {
        /// Tenant ID
        id: String,
    },

    /// Create a tenant
    #[command(after_help = "EXAMPLES:
    ccctl tenant create --data '{\"name\":\"acme\",\"userId\":\"2\",\"shortName\":\"acme\"}'
")]
    Create {
        /// Tenant JSON (string or @file)
        #[arg(long)]
        data: String,
    },

    /// Update a tenant
    Update {
        /// Tenant JSON including its id (string or @file)
        #[arg(long)]
        data: String,
    },

    /// Delete a tenant and wait for the deletion to finish
    #[command(visible_alias = "rm")]
    Delete {
        /// Tenant ID
        id: String,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

/// User commands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    #[command(visible_alias = "ls")]
    List,

    /// Get one user
    Get {
        /// User ID
        id: String,
    },
}

/// Cloud commands
#[derive(Subcommand, Debug)]
pub enum CloudCommands {
    /// List clouds
    #[command(visible_alias = "ls")]
    List,

    /// List the regions of a cloud
    Regions {
        /// Tenant ID
        #[arg(long)]
        tenant: String,

        /// Cloud ID
        #[arg(long)]
        cloud: String,
    },

    /// List the instance types of a region
    InstanceTypes {
        #[arg(long)]
        tenant: String,

        #[arg(long)]
        cloud: String,

        #[arg(long)]
        region: String,

        /// Refresh the list from the provider first
        #[arg(long)]
        sync: bool,
    },
}

/// Cloud account commands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// List the accounts of a cloud
    #[command(visible_alias = "ls")]
    List {
        #[arg(long)]
        tenant: String,

        #[arg(long)]
        cloud: String,

        /// Only accounts with this display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Get one account
    Get {
        #[arg(long)]
        tenant: String,

        #[arg(long)]
        cloud: String,

        /// Account ID
        id: String,
    },

    /// Create an account and wait until it can be used
    Create {
        /// Account JSON with tenantId, cloudId and displayName (string or @file)
        #[arg(long)]
        data: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Update an account and wait for the change to apply
    Update {
        /// Account JSON including its id (string or @file)
        #[arg(long)]
        data: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Delete an account
    #[command(visible_alias = "rm")]
    Delete {
        #[arg(long)]
        tenant: String,

        #[arg(long)]
        cloud: String,

        /// Account ID
        id: String,
    },
}

/// Job commands
#[derive(Subcommand, Debug)]
pub enum JobCommands {
    /// List jobs
    #[command(visible_alias = "ls")]
    List {
        /// Only jobs whose deployment has this name
        #[arg(long)]
        name: Option<String>,
    },

    /// Get one job
    Get {
        /// Job ID
        id: String,
    },

    /// Submit a deployment and wait until it is running
    #[command(after_help = "EXAMPLES:
    # Deploy and wait with the profile's polling bounds
    ccctl job deploy --data @job.json

    # Deploy and return immediately
    ccctl job deploy --data @job.json --async

    # Wait at most ten minutes, reading every 15 seconds
    ccctl job deploy --data @job.json --interval 15 --timeout 600
")]
    Deploy {
        /// Job JSON (string or @file)
        #[arg(long)]
        data: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Submit changes to a job and wait until they are applied
    Update {
        /// Job JSON including its id (string or @file)
        #[arg(long)]
        data: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Terminate a job and wait for the deletion to finish
    #[command(visible_alias = "rm")]
    Delete {
        /// Job ID
        id: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Wait for an existing job to reach a terminal status
    Wait {
        /// Job ID
        id: String,

        /// Seconds between status reads
        #[arg(long)]
        interval: Option<u64>,

        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

/// Operation status commands
#[derive(Subcommand, Debug)]
pub enum OperationCommands {
    /// Read an operation's status once
    Get {
        /// Operation ID
        id: String,
    },

    /// Wait for an operation to reach a terminal status
    Wait {
        /// Operation ID
        id: String,

        /// Seconds between status reads
        #[arg(long)]
        interval: Option<u64>,

        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

/// Application commands
#[derive(Subcommand, Debug)]
pub enum AppCommands {
    /// List application profiles
    #[command(visible_alias = "ls")]
    List,

    /// Import an application archive
    Import {
        /// Path to the exported archive
        file: std::path::PathBuf,
    },
}

/// Bundle commands
#[derive(Subcommand, Debug)]
pub enum BundleCommands {
    /// List the bundles of a tenant
    #[command(visible_alias = "ls")]
    List {
        #[arg(long)]
        tenant: String,
    },

    /// Get a bundle by ID or by name
    Get {
        #[arg(long)]
        tenant: String,

        /// Bundle ID
        #[arg(required_unless_present = "name", conflicts_with = "name")]
        id: Option<String>,

        /// Bundle name
        #[arg(long)]
        name: Option<String>,
    },
}

/// Virtual machine commands
#[derive(Subcommand, Debug)]
pub enum VmCommands {
    /// List virtual machines
    #[command(visible_alias = "ls")]
    List,

    /// Get one virtual machine
    Get {
        /// Virtual machine ID
        id: String,
    },

    /// Show the cost summary across all virtual machines
    Cost,
}
