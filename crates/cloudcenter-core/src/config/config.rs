//! Profile configuration for ccctl and library users
//!
//! Configuration is stored in TOML with any number of named profiles, each
//! pointing at one CloudCenter manager.

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::credential::CredentialStore;
use super::error::{ConfigError, Result};
use crate::poll::PollOptions;

/// Environment variable overriding a profile's manager URL
pub const ENV_URL: &str = "CLOUDCENTER_URL";
/// Environment variable overriding a profile's username
pub const ENV_USERNAME: &str = "CLOUDCENTER_USERNAME";
/// Environment variable overriding a profile's API key
pub const ENV_API_KEY: &str = "CLOUDCENTER_API_KEY";

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when none is named on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// One CloudCenter manager and the credentials to reach it
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Profile {
    /// Manager base URL, e.g. `https://ccm.example.com`
    pub url: String,
    pub username: String,
    /// API key, or a `keyring:` reference
    pub api_key: String,
    /// Skip TLS certificate validation
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub insecure: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_timeout_secs: Option<u64>,
}

/// Profile values after environment and keyring resolution
#[derive(Clone, PartialEq)]
pub struct ResolvedCredentials {
    pub url: String,
    pub username: String,
    pub api_key: String,
}

impl std::fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("api_key", &"***")
            .finish()
    }
}

impl Profile {
    /// Resolve URL, username and API key, honouring the `CLOUDCENTER_*`
    /// environment overrides and keyring references.
    pub fn resolve_credentials(&self) -> Result<ResolvedCredentials> {
        self.resolve_credentials_with_env(true)
    }

    /// Like [`Profile::resolve_credentials`], optionally ignoring the
    /// environment so an explicit config file is used as-is.
    pub fn resolve_credentials_with_env(&self, use_env: bool) -> Result<ResolvedCredentials> {
        let env = |var| use_env.then_some(var);
        let store = CredentialStore::new();
        let url = store.resolve(&self.url, env(ENV_URL))?;
        let username = store.resolve(&self.username, env(ENV_USERNAME))?;
        let api_key = store
            .resolve(&self.api_key, env(ENV_API_KEY))
            .map_err(|e| ConfigError::CredentialError(format!("API key: {}", e)))?;
        Ok(ResolvedCredentials {
            url,
            username,
            api_key,
        })
    }

    /// Polling bounds for this profile, starting from the library defaults
    pub fn poll_options(&self) -> PollOptions {
        let mut options = PollOptions::default();
        if let Some(secs) = self.poll_interval_secs {
            options.interval = Duration::from_secs(secs);
        }
        if let Some(secs) = self.poll_timeout_secs {
            options.timeout = Some(Duration::from_secs(secs));
        }
        options
    }

    /// Mask the API key for display
    pub fn masked_api_key(&self) -> String {
        if CredentialStore::is_keyring_reference(&self.api_key) {
            return self.api_key.clone();
        }
        match self.api_key.len() {
            0 => String::new(),
            n if n <= 4 => "****".to_string(),
            _ => format!("{}****", &self.api_key[..4]),
        }
    }
}

impl Config {
    /// Pick the profile to use: explicit name, then the default, then the
    /// alphabetically first profile.
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(name) = explicit_profile {
            if !self.profiles.contains_key(name) {
                return Err(ConfigError::ProfileNotFound {
                    name: name.to_string(),
                });
            }
            return Ok(name.to_string());
        }

        if let Some(ref default) = self.default_profile
            && self.profiles.contains_key(default)
        {
            return Ok(default.clone());
        }

        self.list_profiles()
            .first()
            .map(|(name, _)| (*name).clone())
            .ok_or_else(|| ConfigError::NoProfiles {
                suggestion: "Use 'ccctl profile set' to create one, or set CLOUDCENTER_URL, \
                             CLOUDCENTER_USERNAME and CLOUDCENTER_API_KEY."
                    .to_string(),
            })
    }

    /// Look up a profile by name
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path. A missing file is an empty config.
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let expanded_content = Self::expand_env_vars(&content);
        let config: Config = toml::from_str(&expanded_content)?;

        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to a specific path, creating parent directories
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// Set or update a profile
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile by name, clearing the default if it pointed there
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// List all profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Get the path to the configuration file
    ///
    /// On macOS `~/.config/ccctl/config.toml` is preferred when it exists.
    /// Otherwise the platform location is used:
    /// Linux `~/.config/ccctl/config.toml`,
    /// Windows `%APPDATA%\cisco\ccctl\config\config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style_path = base_dirs
                    .home_dir()
                    .join(".config")
                    .join("ccctl")
                    .join("config.toml");
                if linux_style_path.parent().is_some_and(|p| p.exists()) {
                    return Ok(linux_style_path);
                }
            }
        }

        let proj_dirs =
            ProjectDirs::from("com", "cisco", "ccctl").ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand `${VAR}` and `${VAR:-default}` references.
    ///
    /// Unset variables without a default are left as written so that
    /// profiles which are never used do not need their variables set.
    fn expand_env_vars(content: &str) -> String {
        shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok()).to_string()
    }
}
