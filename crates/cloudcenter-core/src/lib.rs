//! # cloudcenter-core
//!
//! Client library for the CloudCenter management REST API.
//!
//! ## Layers
//!
//! - [`client`] - authenticated JSON transport (basic auth, status policy, uploads)
//! - [`resources`] - typed records and one handler per resource family
//! - [`poll`] - bounded polling of long-running operations with progress events
//! - [`workflows`] - submit, wait, and resolve helpers built on the layers above
//! - [`config`] - named profiles stored in TOML, with env and keyring overrides
//!
//! ## Example
//!
//! ```rust,ignore
//! use cloudcenter_core::{CloudCenterClient, PollOptions, Job};
//! use cloudcenter_core::workflows::add_job_and_wait;
//!
//! let client = CloudCenterClient::builder()
//!     .base_url("https://ccm.example.com")
//!     .username("cliqradmin")
//!     .api_key(std::env::var("CLOUDCENTER_API_KEY")?)
//!     .build()?;
//!
//! let job: Job = serde_json::from_str(&std::fs::read_to_string("job.json")?)?;
//! let deployed = add_job_and_wait(&client, &job, &PollOptions::default(), None).await?;
//! println!("{:?}", deployed.status);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod poll;
pub mod resources;
pub mod workflows;

pub use client::{CloudCenterClient, CloudCenterClientBuilder};
pub use config::{Config, ConfigError, CredentialStore, Profile, ResolvedCredentials};
pub use error::{CoreError, Result};
pub use poll::{
    OperationKind, PollOptions, PollState, Pollable, ProgressCallback, ProgressEvent,
    StatusVocabulary, poll_until_terminal,
};

pub use resources::apps::{App, AppHandler};
pub use resources::cloud_accounts::{CloudAccount, CloudAccountHandler};
pub use resources::clouds::{Cloud, CloudHandler};
pub use resources::jobs::{Job, JobHandler};
pub use resources::operation_status::{OperationStatus, OperationStatusHandler};
pub use resources::tenants::{Tenant, TenantHandler};
pub use resources::users::{User, UserHandler};
pub use resources::virtual_machines::{VirtualMachine, VirtualMachineHandler};
pub use resources::{NameValue, ResourceRef};
