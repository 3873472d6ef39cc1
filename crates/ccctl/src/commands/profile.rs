//! Profile management command implementations

use std::time::Instant;

use cloudcenter_core::config::credential::KEYRING_PREFIX;
use cloudcenter_core::{Config, CredentialStore, Profile, UserHandler};
use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, trace};

use crate::cli::ProfileCommands;
use crate::connection::ConnectionManager;
use crate::error::{CcctlError, Result as CliResult};
use crate::output::OutputFormat;
use super::utils::emit;

/// Handle profile management commands
pub async fn handle_profile_command(
    profile_cmd: &ProfileCommands,
    conn_mgr: &mut ConnectionManager,
    output_format: OutputFormat,
) -> CliResult<()> {
    use ProfileCommands::*;

    match profile_cmd {
        List => handle_list(conn_mgr, output_format),
        Path => handle_path(conn_mgr),
        Show { name } => handle_show(conn_mgr, name, output_format),
        Set {
            name,
            url,
            username,
            api_key,
            insecure,
            poll_interval,
            poll_timeout,
            #[cfg(feature = "secure-storage")]
            use_keyring,
        } => {
            #[cfg(feature = "secure-storage")]
            let use_keyring = *use_keyring;
            #[cfg(not(feature = "secure-storage"))]
            let use_keyring = false;

            let profile = Profile {
                url: url.clone(),
                username: username.clone(),
                api_key: api_key.clone(),
                insecure: *insecure,
                poll_interval_secs: *poll_interval,
                poll_timeout_secs: *poll_timeout,
            };
            handle_set(conn_mgr, name, profile, use_keyring)
        }
        Remove { name } => handle_remove(conn_mgr, name),
        Default { name } => handle_default(conn_mgr, name),
        Validate { connect } => handle_validate(conn_mgr, *connect, output_format).await,
    }
}

fn config_path_display(conn_mgr: &ConnectionManager) -> String {
    conn_mgr
        .config_path
        .clone()
        .or_else(|| Config::config_path().ok())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}

fn handle_list(conn_mgr: &ConnectionManager, output_format: OutputFormat) -> CliResult<()> {
    debug!("Listing all configured profiles");
    let profiles = conn_mgr.config.list_profiles();
    trace!("Found {} profiles", profiles.len());

    if profiles.is_empty() && output_format == OutputFormat::Table {
        println!("No profiles configured.");
        println!("Create one with: ccctl profile set <name> --url <url> --username <user> --api-key <key>");
        return Ok(());
    }

    let default = conn_mgr.config.default_profile.as_deref();
    let rows: Vec<serde_json::Value> = profiles
        .iter()
        .map(|(name, profile)| {
            json!({
                "name": name,
                "url": profile.url,
                "username": profile.username,
                "insecure": profile.insecure,
                "default": default == Some(name.as_str()),
            })
        })
        .collect();

    emit(rows, output_format, None)?;
    Ok(())
}

fn handle_path(conn_mgr: &ConnectionManager) -> CliResult<()> {
    println!("{}", config_path_display(conn_mgr));
    Ok(())
}

fn handle_show(
    conn_mgr: &ConnectionManager,
    name: &str,
    output_format: OutputFormat,
) -> CliResult<()> {
    let profile = conn_mgr.config.profile(name)?;
    let is_default = conn_mgr.config.default_profile.as_deref() == Some(name);

    let details = json!({
        "name": name,
        "url": profile.url,
        "username": profile.username,
        "api_key": profile.masked_api_key(),
        "insecure": profile.insecure,
        "poll_interval_secs": profile.poll_interval_secs,
        "poll_timeout_secs": profile.poll_timeout_secs,
        "default": is_default,
    });
    emit(details, output_format, None)?;
    Ok(())
}

fn handle_set(
    conn_mgr: &mut ConnectionManager,
    name: &str,
    mut profile: Profile,
    use_keyring: bool,
) -> CliResult<()> {
    debug!("Setting profile '{}'", name);

    if profile.url.trim().is_empty() || profile.username.trim().is_empty() {
        return Err(CcctlError::InvalidInput {
            message: "--url and --username must not be empty".to_string(),
        });
    }

    if use_keyring {
        let store = CredentialStore::new();
        profile.api_key = store.store(&format!("{}-api-key", name), &profile.api_key)?;
        info!("Stored API key for '{}' in the {}", name, store.backend());
    }

    let first_profile = conn_mgr.config.profiles.is_empty();
    conn_mgr.config.set_profile(name.to_string(), profile);
    if first_profile {
        conn_mgr.config.default_profile = Some(name.to_string());
    }
    conn_mgr.save_config()?;

    println!("Profile '{}' saved to {}", name, config_path_display(conn_mgr));
    if first_profile {
        println!("Profile '{}' is now the default", name);
    }
    Ok(())
}

fn handle_remove(conn_mgr: &mut ConnectionManager, name: &str) -> CliResult<()> {
    let removed = conn_mgr
        .config
        .remove_profile(name)
        .ok_or_else(|| CcctlError::ProfileNotFound {
            name: name.to_string(),
        })?;

    if let Some(entry) = removed.api_key.strip_prefix(KEYRING_PREFIX) {
        CredentialStore::new().delete(entry)?;
    }
    conn_mgr.save_config()?;

    println!("Profile '{}' removed", name);
    Ok(())
}

fn handle_default(conn_mgr: &mut ConnectionManager, name: &str) -> CliResult<()> {
    conn_mgr.config.profile(name)?;
    conn_mgr.config.default_profile = Some(name.to_string());
    conn_mgr.save_config()?;

    println!("Default profile set to '{}'", name);
    Ok(())
}

#[derive(Debug, Serialize)]
struct ValidationOutput {
    config_path: String,
    config_exists: bool,
    profile_count: usize,
    profiles: Vec<ProfileValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_profile: Option<DefaultValidation>,
    overall_valid: bool,
}

#[derive(Debug, Serialize)]
struct ProfileValidationResult {
    name: String,
    valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    connectivity: Option<ConnectivityResult>,
}

#[derive(Debug, Serialize)]
struct DefaultValidation {
    name: String,
    valid: bool,
}

#[derive(Debug, Serialize)]
struct ConnectivityResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Structural checks that need no network access
fn validate_profile_structure(profile: &Profile) -> Vec<String> {
    let mut issues = Vec::new();
    if profile.url.trim().is_empty() {
        issues.push("url is empty".to_string());
    } else if !profile.url.contains("${")
        && !profile.url.starts_with("http://")
        && !profile.url.starts_with("https://")
    {
        issues.push(format!("url '{}' is not an http(s) URL", profile.url));
    }
    if profile.username.trim().is_empty() {
        issues.push("username is empty".to_string());
    }
    if profile.api_key.trim().is_empty() {
        issues.push("api_key is empty".to_string());
    }
    issues
}

async fn test_connectivity(conn_mgr: &ConnectionManager, name: &str) -> ConnectivityResult {
    let start = Instant::now();
    let client = match conn_mgr.create_client(Some(name)) {
        Ok(client) => client,
        Err(e) => {
            return ConnectivityResult {
                success: false,
                latency_ms: None,
                error: Some(e.to_string()),
            };
        }
    };

    match UserHandler::new(client).list().await {
        Ok(_) => ConnectivityResult {
            success: true,
            latency_ms: Some(start.elapsed().as_millis()),
            error: None,
        },
        Err(e) => ConnectivityResult {
            success: false,
            latency_ms: None,
            error: Some(CcctlError::from(e).to_string()),
        },
    }
}

async fn handle_validate(
    conn_mgr: &ConnectionManager,
    connect: bool,
    output_format: OutputFormat,
) -> CliResult<()> {
    debug!("Validating configuration (connect={})", connect);

    let config_path = config_path_display(conn_mgr);
    let config_exists = conn_mgr
        .config_path
        .clone()
        .or_else(|| Config::config_path().ok())
        .is_some_and(|p| p.exists());

    let profiles = conn_mgr.config.list_profiles();
    let mut profile_results = Vec::new();
    for (name, profile) in &profiles {
        let issues = validate_profile_structure(profile);
        let valid = issues.is_empty();
        let connectivity = if connect && valid {
            Some(test_connectivity(conn_mgr, name).await)
        } else {
            None
        };
        profile_results.push(ProfileValidationResult {
            name: (*name).clone(),
            valid,
            issues,
            connectivity,
        });
    }

    let default_profile = conn_mgr
        .config
        .default_profile
        .as_ref()
        .map(|name| DefaultValidation {
            name: name.clone(),
            valid: conn_mgr.config.profiles.contains_key(name),
        });

    let overall_valid = config_exists
        && profile_results
            .iter()
            .all(|r| r.valid && r.connectivity.as_ref().is_none_or(|c| c.success))
        && default_profile.as_ref().is_none_or(|d| d.valid);

    let result = ValidationOutput {
        config_path,
        config_exists,
        profile_count: profiles.len(),
        profiles: profile_results,
        default_profile,
        overall_valid,
    };

    match output_format {
        OutputFormat::Json | OutputFormat::Yaml => {
            emit(&result, output_format, None)?;
        }
        OutputFormat::Table => print_validation_human(&result),
    }
    Ok(())
}

/// Print validation results in human-readable format
fn print_validation_human(result: &ValidationOutput) {
    println!("Configuration file: {}", result.config_path);

    if !result.config_exists {
        println!("{} Configuration file does not exist", "x".red());
        println!("\nTry:");
        println!("  Create a profile: ccctl profile set <name> --url <url> --username <user> --api-key <key>");
        return;
    }

    println!("{} Configuration file exists and is readable", "ok".green());
    println!("{} Found {} profile(s)", "ok".green(), result.profile_count);

    for profile in &result.profiles {
        if profile.valid {
            println!("{} Profile '{}'", "ok".green(), profile.name);
        } else {
            println!("{} Profile '{}'", "x".red(), profile.name);
            for issue in &profile.issues {
                println!("    {}", issue);
            }
        }
        if let Some(conn) = &profile.connectivity {
            match (&conn.error, conn.latency_ms) {
                (None, Some(ms)) => println!("    {} Connected in {}ms", "ok".green(), ms),
                (Some(err), _) => println!("    {} Connection failed: {}", "x".red(), err),
                _ => {}
            }
        }
    }

    if let Some(default) = &result.default_profile {
        if default.valid {
            println!("{} Default profile '{}' exists", "ok".green(), default.name);
        } else {
            println!(
                "{} Default profile '{}' does not exist",
                "x".red(),
                default.name
            );
        }
    }

    if result.overall_valid {
        println!("\n{}", "Configuration is valid".green());
    } else {
        println!("\n{}", "Configuration has problems".red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_checks() {
        let good = Profile {
            url: "https://ccm.lab".to_string(),
            username: "admin".to_string(),
            api_key: "key".to_string(),
            ..Default::default()
        };
        assert!(validate_profile_structure(&good).is_empty());

        let templated = Profile {
            url: "${CCM_URL}".to_string(),
            ..good.clone()
        };
        assert!(validate_profile_structure(&templated).is_empty());

        let bad = Profile {
            url: "ccm.lab".to_string(),
            username: String::new(),
            ..good
        };
        assert_eq!(validate_profile_structure(&bad).len(), 2);
    }
}
