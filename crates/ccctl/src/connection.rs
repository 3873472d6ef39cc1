//! Connection management for CloudCenter clients

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use cloudcenter_core::config::{ENV_API_KEY, ENV_URL, ENV_USERNAME};
use cloudcenter_core::{CloudCenterClient, Config, PollOptions, ResolvedCredentials};
use tracing::{debug, info, trace};

use crate::cli::WaitArgs;
use crate::error::Result as CliResult;

/// User agent string for ccctl HTTP requests
const CCCTL_USER_AGENT: &str = concat!("ccctl/", env!("CARGO_PKG_VERSION"));

/// Credentials plus the TLS setting from the same source
pub struct ResolvedConnection {
    pub credentials: ResolvedCredentials,
    pub insecure: bool,
}

/// Connection manager for creating authenticated clients
#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl ConnectionManager {
    /// Create a new connection manager with a custom config path
    pub fn with_config_path(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Save the configuration to the appropriate location
    pub fn save_config(&self) -> CliResult<()> {
        if let Some(ref path) = self.config_path {
            self.config
                .save_to_path(path)
                .context("Failed to save configuration")?;
        } else {
            self.config.save().context("Failed to save configuration")?;
        }
        Ok(())
    }

    /// Environment variables are ignored when `--config-file` was given.
    fn use_env_vars(&self) -> bool {
        self.config_path.is_none()
    }

    /// Resolve credentials and TLS settings for a profile, or from the
    /// environment alone
    ///
    /// With all three `CLOUDCENTER_*` variables set and no profile named,
    /// no config file is needed at all. Such a connection never inherits
    /// `insecure` from a profile.
    pub fn resolve_connection(&self, profile_name: Option<&str>) -> CliResult<ResolvedConnection> {
        let use_env_vars = self.use_env_vars();
        debug!(
            "Config path: {:?}, use_env_vars: {}",
            self.config_path, use_env_vars
        );
        if !use_env_vars {
            info!("--config-file specified explicitly, ignoring environment variables");
        }

        if use_env_vars
            && profile_name.is_none()
            && let (Ok(url), Ok(username), Ok(api_key)) = (
                std::env::var(ENV_URL),
                std::env::var(ENV_USERNAME),
                std::env::var(ENV_API_KEY),
            )
        {
            info!("Using CloudCenter credentials from environment variables");
            return Ok(ResolvedConnection {
                credentials: ResolvedCredentials {
                    url,
                    username,
                    api_key,
                },
                insecure: false,
            });
        }

        let resolved = self.config.resolve_profile(profile_name)?;
        info!("Using CloudCenter profile: {}", resolved);
        let profile = self.config.profile(&resolved)?;
        Ok(ResolvedConnection {
            credentials: profile.resolve_credentials_with_env(use_env_vars)?,
            insecure: profile.insecure,
        })
    }

    /// Create a client for the named (or default) profile
    pub fn create_client(&self, profile_name: Option<&str>) -> CliResult<CloudCenterClient> {
        debug!("Creating CloudCenter client");
        trace!("Profile name: {:?}", profile_name);

        let ResolvedConnection {
            credentials,
            insecure,
        } = self.resolve_connection(profile_name)?;

        info!("Connecting to CloudCenter: {}", credentials.url);
        debug!("Username: {}", credentials.username);
        if insecure {
            debug!("SSL certificate verification disabled");
        }

        let client = CloudCenterClient::builder()
            .base_url(&credentials.url)
            .username(&credentials.username)
            .api_key(&credentials.api_key)
            .insecure(insecure)
            .user_agent(CCCTL_USER_AGENT)
            .build()?;

        debug!("CloudCenter client created successfully");
        Ok(client)
    }

    /// Polling bounds: command-line flags, then the profile, then the library defaults
    pub fn poll_options(&self, profile_name: Option<&str>, wait: &WaitArgs) -> PollOptions {
        let mut options = self
            .config
            .resolve_profile(profile_name)
            .ok()
            .and_then(|name| self.config.profiles.get(&name))
            .map(|p| p.poll_options())
            .unwrap_or_default();

        if let Some(secs) = wait.interval {
            options.interval = Duration::from_secs(secs);
        }
        if let Some(secs) = wait.timeout {
            options.timeout = Some(Duration::from_secs(secs));
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudcenter_core::Profile;

    fn manager_with_profile(profile: Profile) -> ConnectionManager {
        let mut config = Config::default();
        config.set_profile("lab".to_string(), profile);
        ConnectionManager::with_config_path(config, Some(PathBuf::from("/tmp/ccctl-test.toml")))
    }

    #[test]
    fn test_flags_override_profile_poll_bounds() {
        let manager = manager_with_profile(Profile {
            url: "https://ccm.lab".to_string(),
            username: "admin".to_string(),
            api_key: "key".to_string(),
            poll_interval_secs: Some(5),
            poll_timeout_secs: Some(120),
            ..Default::default()
        });

        let from_profile = manager.poll_options(None, &WaitArgs::default());
        assert_eq!(from_profile.interval, Duration::from_secs(5));
        assert_eq!(from_profile.timeout, Some(Duration::from_secs(120)));

        let overridden = manager.poll_options(
            Some("lab"),
            &WaitArgs {
                no_wait: false,
                interval: Some(1),
                timeout: Some(30),
            },
        );
        assert_eq!(overridden.interval, Duration::from_secs(1));
        assert_eq!(overridden.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_poll_defaults_without_profiles() {
        let manager = ConnectionManager::with_config_path(Config::default(), None);
        let options = manager.poll_options(None, &WaitArgs::default());
        assert_eq!(options.interval, Duration::from_secs(10));
    }

    #[test]
    fn test_explicit_config_file_uses_profile_values() {
        let manager = manager_with_profile(Profile {
            url: "https://ccm.lab".to_string(),
            username: "admin".to_string(),
            api_key: "key".to_string(),
            ..Default::default()
        });
        let connection = manager.resolve_connection(None).unwrap();
        assert_eq!(connection.credentials.url, "https://ccm.lab");
        assert_eq!(connection.credentials.api_key, "key");
    }

    #[test]
    fn test_missing_profile_is_reported() {
        let manager = ConnectionManager::with_config_path(
            Config::default(),
            Some(PathBuf::from("/tmp/ccctl-test.toml")),
        );
        assert!(matches!(
            manager.resolve_connection(Some("nope")),
            Err(crate::error::CcctlError::ProfileNotFound { .. })
        ));
    }

    #[test]
    #[serial_test::serial]
    fn test_env_only_connection_ignores_profile_insecure() {
        let mut config = Config::default();
        config.set_profile(
            "lab".to_string(),
            Profile {
                url: "https://ccm.lab".to_string(),
                username: "admin".to_string(),
                api_key: "key".to_string(),
                insecure: true,
                ..Default::default()
            },
        );
        let manager = ConnectionManager::with_config_path(config, None);

        unsafe {
            std::env::set_var(ENV_URL, "https://ccm.prod");
            std::env::set_var(ENV_USERNAME, "ops");
            std::env::set_var(ENV_API_KEY, "prod-key");
        }
        let from_env = manager.resolve_connection(None);
        let from_profile = manager.resolve_connection(Some("lab"));
        unsafe {
            std::env::remove_var(ENV_URL);
            std::env::remove_var(ENV_USERNAME);
            std::env::remove_var(ENV_API_KEY);
        }

        let from_env = from_env.unwrap();
        assert_eq!(from_env.credentials.url, "https://ccm.prod");
        assert!(!from_env.insecure);
        assert!(from_profile.unwrap().insecure);
    }
}
