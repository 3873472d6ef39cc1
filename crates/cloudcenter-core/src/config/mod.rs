//! Connection profiles for CloudCenter managers
//!
//! Profiles live in a TOML file at the platform config location and may
//! reference environment variables (`${VAR}`, `${VAR:-default}`) or keyring
//! entries (`keyring:<name>`, with the `secure-storage` feature).
//!
//! ```toml
//! default_profile = "lab"
//!
//! [profiles.lab]
//! url = "https://ccm.lab.example.com"
//! username = "cliqradmin"
//! api_key = "${CCM_LAB_KEY}"
//! insecure = true
//! poll_interval_secs = 5
//! ```

#![allow(clippy::module_inception)]

pub mod config;
pub mod credential;
pub mod error;

pub use config::{Config, ENV_API_KEY, ENV_URL, ENV_USERNAME, Profile, ResolvedCredentials};
pub use credential::CredentialStore;
pub use error::{ConfigError, Result};
