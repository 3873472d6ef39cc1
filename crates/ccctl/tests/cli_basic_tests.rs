use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test command isolated from the caller's environment
fn ccctl() -> Command {
    let mut cmd = Command::cargo_bin("ccctl").unwrap();
    cmd.env_remove("CCCTL_PROFILE")
        .env_remove("CCCTL_CONFIG_FILE")
        .env_remove("CLOUDCENTER_URL")
        .env_remove("CLOUDCENTER_USERNAME")
        .env_remove("CLOUDCENTER_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn config_file(dir: &TempDir) -> PathBuf {
    dir.path().join("config.toml")
}

/// Write a config with one profile pointing at `url`
fn write_profile(config: &Path, url: &str) {
    std::fs::write(
        config,
        format!(
            "default_profile = \"lab\"\n\n[profiles.lab]\nurl = \"{}\"\nusername = \"admin\"\napi_key = \"secret\"\n",
            url
        ),
    )
    .unwrap();
}

#[test]
fn test_help_flag() {
    ccctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CloudCenter management API"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_version_flag() {
    ccctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ccctl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_json() {
    ccctl()
        .args(["version", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn test_no_args_shows_help() {
    ccctl()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    ccctl()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_job_help_mentions_async() {
    ccctl()
        .args(["job", "deploy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--async"))
        .stdout(predicate::str::contains("--timeout"));
}

#[test]
fn test_completions_bash() {
    ccctl()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ccctl"));
}

#[test]
fn test_profile_lifecycle() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);
    let config_arg = config.to_str().unwrap();

    ccctl()
        .args(["--config-file", config_arg, "profile", "set", "lab"])
        .args(["--url", "https://ccm.lab", "--username", "admin"])
        .args(["--api-key", "abcdef123", "--poll-interval", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'lab' saved"))
        .stdout(predicate::str::contains("now the default"));

    let saved = std::fs::read_to_string(&config).unwrap();
    assert!(saved.contains("default_profile = \"lab\""));
    assert!(saved.contains("poll_interval_secs = 5"));

    ccctl()
        .args(["--config-file", config_arg, "-o", "json", "profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"lab\""))
        .stdout(predicate::str::contains("\"default\": true"));

    ccctl()
        .args(["--config-file", config_arg, "-o", "json", "profile", "show", "lab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abcd****"))
        .stdout(predicate::str::contains("abcdef123").not());

    ccctl()
        .args(["--config-file", config_arg, "profile", "remove", "lab"])
        .assert()
        .success();

    ccctl()
        .args(["--config-file", config_arg, "profile", "remove", "lab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'lab' not found"));
}

#[test]
fn test_default_requires_existing_profile() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);

    ccctl()
        .args(["--config-file", config.to_str().unwrap(), "profile", "default", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'nope' not found"))
        .stderr(predicate::str::contains("tip"));
}

#[test]
fn test_command_without_profile_explains_setup() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);

    ccctl()
        .args(["--config-file", config.to_str().unwrap(), "tenant", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No profile configured"));
}

#[test]
fn test_profile_path_uses_explicit_file() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);
    let config_arg = config.to_str().unwrap();

    ccctl()
        .args(["--config-file", config_arg, "profile", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config_arg));
}

#[test]
fn test_invalid_data_is_rejected_before_any_request() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);
    // Nothing listens here; an attempted request would be a connection error.
    write_profile(&config, "http://127.0.0.1:9");

    ccctl()
        .args(["--config-file", config.to_str().unwrap()])
        .args(["job", "deploy", "--data", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_api_get_sends_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": "2", "username": "admin"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);
    write_profile(&config, &server.uri());

    ccctl()
        .args(["--config-file", config.to_str().unwrap(), "api", "get", "/v1/users"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\": \"admin\""));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_api_error_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tenants/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"msg": "Tenant 9 not found"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);
    write_profile(&config, &server.uri());

    ccctl()
        .args(["--config-file", config.to_str().unwrap(), "tenant", "get", "9"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Tenant 9 not found"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_job_deploy_async_prints_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/jobs"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "42", "status": "JobSubmitted"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/jobs/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42"})))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);
    write_profile(&config, &server.uri());

    ccctl()
        .args(["--config-file", config.to_str().unwrap(), "-o", "json"])
        .args(["job", "deploy", "--data", r#"{"name":"web"}"#, "--async"])
        .assert()
        .success()
        .stdout(predicate::str::contains("JobSubmitted"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_job_deploy_waits_until_running() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/jobs"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "42", "status": "JobSubmitted"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/jobs/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "42", "status": "JobRunning"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);
    write_profile(&config, &server.uri());

    ccctl()
        .args(["--config-file", config.to_str().unwrap(), "-o", "json"])
        .args(["job", "deploy", "--data", r#"{"name":"web"}"#, "--interval", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("JobRunning"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_job_deploy_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/jobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "42"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/jobs/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "42",
            "status": "JobError",
            "jobStatusMessage": "quota exceeded"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);
    write_profile(&config, &server.uri());

    ccctl()
        .args(["--config-file", config.to_str().unwrap()])
        .args(["job", "deploy", "--data", r#"{"name":"web"}"#, "--interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Job deployment failed (status JobError): quota exceeded",
        ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tenant_delete_accepted_is_not_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/tenants/5"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"msg": "Delete tenant request accepted"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);
    write_profile(&config, &server.uri());

    ccctl()
        .args(["--config-file", config.to_str().unwrap(), "tenant", "delete", "5"])
        .assert()
        .success()
        .stderr(predicate::str::contains("all sub-tenants"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tenant_delete_async_accepted_prints_conditions() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/tenants/5"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"msg": "Delete tenant request accepted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);
    write_profile(&config, &server.uri());

    ccctl()
        .args(["--config-file", config.to_str().unwrap()])
        .args(["tenant", "delete", "5", "--async"])
        .assert()
        .success()
        .stderr(predicate::str::contains("all sub-tenants"));
}
