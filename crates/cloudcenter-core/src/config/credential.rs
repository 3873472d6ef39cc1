//! Credential resolution with optional OS keyring support
//!
//! A profile value is resolved in this order:
//! 1. the override environment variable, when set
//! 2. the OS keyring, when the value is `keyring:<name>`
//! 3. the value itself

use std::env;

use super::error::{ConfigError, Result};

/// Marks a config value as a keyring reference
pub const KEYRING_PREFIX: &str = "keyring:";

#[cfg(feature = "secure-storage")]
const SERVICE_NAME: &str = "ccctl";

/// Resolves and stores profile secrets
#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialStore;

impl CredentialStore {
    pub fn new() -> Self {
        Self
    }

    /// True when `value` names a keyring entry rather than holding a secret
    pub fn is_keyring_reference(value: &str) -> bool {
        value.starts_with(KEYRING_PREFIX)
    }

    /// Name of the active backend, for display
    pub fn backend(&self) -> &'static str {
        if cfg!(feature = "secure-storage") {
            "keyring"
        } else {
            "plaintext"
        }
    }

    /// Resolve a config value to the secret it stands for
    pub fn resolve(&self, value: &str, env_var: Option<&str>) -> Result<String> {
        if let Some(var) = env_var
            && let Ok(from_env) = env::var(var)
            && !from_env.is_empty()
        {
            return Ok(from_env);
        }

        match value.strip_prefix(KEYRING_PREFIX) {
            Some(entry) => self.read_keyring(entry),
            None => Ok(value.to_string()),
        }
    }

    /// Store a secret and return the value to write into the config file.
    ///
    /// Without the `secure-storage` feature the secret itself is returned.
    pub fn store(&self, entry: &str, secret: &str) -> Result<String> {
        #[cfg(feature = "secure-storage")]
        {
            keyring::Entry::new(SERVICE_NAME, entry)
                .and_then(|e| e.set_password(secret))
                .map_err(|e| ConfigError::KeyringError(format!("storing '{}': {}", entry, e)))?;
            Ok(format!("{}{}", KEYRING_PREFIX, entry))
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            let _ = entry;
            Ok(secret.to_string())
        }
    }

    /// Remove a keyring entry. Missing entries are not an error.
    pub fn delete(&self, entry: &str) -> Result<()> {
        #[cfg(feature = "secure-storage")]
        {
            let handle = keyring::Entry::new(SERVICE_NAME, entry)
                .map_err(|e| ConfigError::KeyringError(e.to_string()))?;
            match handle.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(ConfigError::KeyringError(format!("deleting '{}': {}", entry, e))),
            }
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            let _ = entry;
            Ok(())
        }
    }

    #[cfg(feature = "secure-storage")]
    fn read_keyring(&self, entry: &str) -> Result<String> {
        keyring::Entry::new(SERVICE_NAME, entry)
            .and_then(|e| e.get_password())
            .map_err(|e| ConfigError::KeyringError(format!("reading '{}': {}", entry, e)))
    }

    #[cfg(not(feature = "secure-storage"))]
    fn read_keyring(&self, entry: &str) -> Result<String> {
        Err(ConfigError::CredentialError(format!(
            "'{}{}' needs the secure-storage feature",
            KEYRING_PREFIX, entry
        )))
    }
}
