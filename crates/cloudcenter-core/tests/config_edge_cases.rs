//! Profile file handling: required fields, variable expansion, TLS and
//! polling settings, and environment overrides

use std::fs;
use std::path::Path;
use std::time::Duration;

use cloudcenter_core::config::{Config, ConfigError, ENV_API_KEY, ENV_URL, ENV_USERNAME, Profile};
use serial_test::serial;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, content).unwrap();
    config_path
}

fn load(path: &Path) -> Config {
    Config::load_from_path(path).unwrap()
}

// ---------------------------------------------------------------------------
// 1. No profiles at all
// ---------------------------------------------------------------------------

#[test]
fn missing_file_has_no_profiles_and_points_at_env_vars() {
    let dir = TempDir::new().unwrap();
    let config = load(&dir.path().join("absent").join("config.toml"));

    assert!(config.profiles.is_empty());
    let err = config.resolve_profile(None).unwrap_err();
    assert!(matches!(err, ConfigError::NoProfiles { .. }));
    assert!(err.to_string().contains("CLOUDCENTER_URL"));
}

// ---------------------------------------------------------------------------
// 2. Required profile fields
// ---------------------------------------------------------------------------

#[test]
fn each_missing_connection_field_is_named() {
    let fields = [
        ("url", "username = \"admin\"\napi_key = \"k\""),
        ("username", "url = \"https://ccm.lab\"\napi_key = \"k\""),
        ("api_key", "url = \"https://ccm.lab\"\nusername = \"admin\""),
    ];

    for (missing, body) in fields {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &format!("[profiles.lab]\n{}\n", body));

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(
            err.to_string().contains(missing),
            "error for missing {missing} should name it: {err}"
        );
    }
}

// ---------------------------------------------------------------------------
// 3. Variable expansion in profile values
// ---------------------------------------------------------------------------

#[test]
fn url_falls_back_to_expansion_default() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[profiles.lab]
url = "${CCCTL_EDGE_UNSET_HOST:-https://ccm.fallback}"
username = "admin"
api_key = "${CCCTL_EDGE_UNSET_KEY}"
"#,
    );

    let lab = &load(&path).profiles["lab"];
    assert_eq!(lab.url, "https://ccm.fallback");
    // Unset without a default stays as written.
    assert_eq!(lab.api_key, "${CCCTL_EDGE_UNSET_KEY}");
}

#[test]
#[serial]
fn url_expands_from_environment() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[profiles.lab]
url = "https://${CCCTL_EDGE_HOST:-localhost}/"
username = "admin"
api_key = "k"
"#,
    );

    unsafe {
        std::env::set_var("CCCTL_EDGE_HOST", "ccm.lab.example.com");
    }
    let config = load(&path);
    unsafe {
        std::env::remove_var("CCCTL_EDGE_HOST");
    }

    assert_eq!(config.profiles["lab"].url, "https://ccm.lab.example.com/");
}

// ---------------------------------------------------------------------------
// 4. TLS and polling settings
// ---------------------------------------------------------------------------

#[test]
fn insecure_and_poll_bounds_default_when_omitted() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[profiles.lab]
url = "https://ccm.lab"
username = "admin"
api_key = "k"
poll_timeout_secs = 900
"#,
    );

    let lab = &load(&path).profiles["lab"];
    assert!(!lab.insecure);
    assert_eq!(lab.poll_interval_secs, None);

    let options = lab.poll_options();
    assert_eq!(options.interval, Duration::from_secs(10));
    assert_eq!(options.timeout, Some(Duration::from_secs(900)));
}

#[test]
fn secure_profile_saves_without_optional_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.set_profile(
        "lab".to_string(),
        Profile {
            url: "https://ccm.lab".to_string(),
            username: "admin".to_string(),
            api_key: "k".to_string(),
            ..Default::default()
        },
    );
    config.save_to_path(&path).unwrap();

    let saved = fs::read_to_string(&path).unwrap();
    assert!(!saved.contains("insecure"));
    assert!(!saved.contains("poll_"));
    assert!(!saved.contains("default_profile"));
}

// ---------------------------------------------------------------------------
// 5. Environment overrides
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn environment_overrides_apply_unless_disabled() {
    let profile = Profile {
        url: "https://ccm.file".to_string(),
        username: "file-user".to_string(),
        api_key: "file-key".to_string(),
        ..Default::default()
    };

    unsafe {
        std::env::set_var(ENV_URL, "https://ccm.env");
        std::env::set_var(ENV_API_KEY, "env-key");
        std::env::remove_var(ENV_USERNAME);
    }
    let with_env = profile.resolve_credentials();
    let file_only = profile.resolve_credentials_with_env(false);
    unsafe {
        std::env::remove_var(ENV_URL);
        std::env::remove_var(ENV_API_KEY);
    }

    let with_env = with_env.unwrap();
    assert_eq!(with_env.url, "https://ccm.env");
    assert_eq!(with_env.username, "file-user");
    assert_eq!(with_env.api_key, "env-key");

    let file_only = file_only.unwrap();
    assert_eq!(file_only.url, "https://ccm.file");
    assert_eq!(file_only.api_key, "file-key");
}

// ---------------------------------------------------------------------------
// 6. Removing the default profile
// ---------------------------------------------------------------------------

#[test]
fn removing_default_profile_clears_default() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
default_profile = "lab"

[profiles.lab]
url = "https://ccm.lab"
username = "admin"
api_key = "k"

[profiles.prod]
url = "https://ccm.prod"
username = "ops"
api_key = "k"
"#,
    );

    let mut config = load(&path);
    assert!(config.remove_profile("lab").is_some());
    assert!(config.default_profile.is_none());
    assert_eq!(config.resolve_profile(None).unwrap(), "prod");
}

// ---------------------------------------------------------------------------
// 7. Save then load through nested, not-yet-existing directories
// ---------------------------------------------------------------------------

#[test]
fn save_creates_parent_directories_and_roundtrips() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("ccctl").join("config.toml");

    let mut config = Config::default();
    config.set_profile(
        "prod".to_string(),
        Profile {
            url: "https://ccm.prod".to_string(),
            username: "ops".to_string(),
            api_key: "keyring:prod".to_string(),
            insecure: true,
            poll_interval_secs: Some(5),
            poll_timeout_secs: None,
        },
    );
    config.default_profile = Some("prod".to_string());
    config.save_to_path(&config_path).unwrap();

    let loaded = Config::load_from_path(&config_path).unwrap();
    assert_eq!(loaded.default_profile.as_deref(), Some("prod"));
    let prod = &loaded.profiles["prod"];
    assert!(prod.insecure);
    assert_eq!(prod.poll_interval_secs, Some(5));
    assert_eq!(prod.poll_timeout_secs, None);
    assert_eq!(prod.api_key, "keyring:prod");
}

// ---------------------------------------------------------------------------
// 8. Default profile pointing at a removed profile
// ---------------------------------------------------------------------------

#[test]
fn default_profile_naming_missing_profile_falls_back_to_first() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    let content = r#"
default_profile = "gone"

[profiles.beta]
url = "https://b"
username = "u"
api_key = "k"

[profiles.alpha]
url = "https://a"
username = "u"
api_key = "k"
"#;
    fs::write(&config_path, content).unwrap();

    let config = Config::load_from_path(&config_path).unwrap();
    assert_eq!(config.resolve_profile(None).unwrap(), "alpha");
}
