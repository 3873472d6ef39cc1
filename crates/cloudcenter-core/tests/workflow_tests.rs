//! End-to-end submit/wait/resolve flows against a mock manager

use std::cell::Cell;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cloudcenter_core::workflows::{
    TENANT_DELETE_ACCEPTED, add_cloud_account_and_wait, add_job_and_wait, delete_job_and_wait,
    delete_tenant_and_wait, update_job_and_wait,
};
use cloudcenter_core::{
    CloudAccount, CloudCenterClient, CoreError, Job, OperationKind, OperationStatusHandler,
    PollOptions, ProgressEvent, poll_until_terminal,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CloudCenterClient {
    CloudCenterClient::new(server.uri(), "admin", "secret").unwrap()
}

fn fast() -> PollOptions {
    PollOptions::default()
        .with_interval(Duration::from_millis(10))
        .with_timeout(Duration::from_secs(5))
}

/// Respond with `body` for the first `times` matching requests only
async fn mount_once(server: &MockServer, verb: &str, route: &str, body: serde_json::Value, times: u64) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .up_to_n_times(times)
        .mount(server)
        .await;
}

// ============================================================================
// Jobs
// ============================================================================

#[tokio::test]
async fn test_add_job_and_wait_polls_until_running() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/jobs"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "101", "status": "JobSubmitted"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_once(&server, "GET", "/v2/jobs/101", json!({"id": "101", "status": "JobInProgress"}), 2).await;
    mount_once(&server, "GET", "/v2/jobs/101", json!({"id": "101", "status": "JobRunning", "name": "web"}), 10).await;

    let job = Job {
        name: Some("web".to_string()),
        ..Default::default()
    };
    let deployed = add_job_and_wait(&client_for(&server), &job, &fast(), None)
        .await
        .unwrap();

    assert_eq!(deployed.id.as_deref(), Some("101"));
    assert_eq!(deployed.status.as_deref(), Some("JobRunning"));

    // two pending reads, the successful read, then the final read-back
    let reads = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "GET")
        .count();
    assert_eq!(reads, 4);
}

#[tokio::test]
async fn test_add_job_and_wait_reports_job_error() {
    let server = MockServer::start().await;
    mount_once(&server, "POST", "/v2/jobs", json!({"id": "7", "status": "JobSubmitted"}), 1).await;
    mount_once(
        &server,
        "GET",
        "/v2/jobs/7",
        json!({"id": "7", "status": "JobError", "jobStatusMessage": "quota exceeded"}),
        10,
    )
    .await;

    let err = add_job_and_wait(&client_for(&server), &Job::default(), &fast(), None)
        .await
        .unwrap_err();

    match err {
        CoreError::OperationFailed {
            operation,
            status,
            message,
        } => {
            assert_eq!(operation, OperationKind::JobDeployment);
            assert_eq!(status, "JobError");
            assert_eq!(message.as_deref(), Some("quota exceeded"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_add_job_terminal_submission_is_still_read_back() {
    let server = MockServer::start().await;
    // The submission already claims success; only the status read counts.
    mount_once(&server, "POST", "/v2/jobs", json!({"id": "8", "status": "JobRunning"}), 1).await;
    Mock::given(method("GET"))
        .and(path("/v2/jobs/8"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "8", "status": "JobError"})),
        )
        .expect(1..)
        .mount(&server)
        .await;

    let err = add_job_and_wait(&client_for(&server), &Job::default(), &fast(), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::OperationFailed { ref status, .. } if status == "JobError"
    ));
    assert_eq!(err.to_string(), "Job deployment failed (status JobError)");
}

#[tokio::test]
async fn test_add_job_without_id_in_response() {
    let server = MockServer::start().await;
    mount_once(&server, "POST", "/v2/jobs", json!({"status": "JobSubmitted"}), 1).await;

    let err = add_job_and_wait(&client_for(&server), &Job::default(), &fast(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_update_job_requires_id_before_sending() {
    let server = MockServer::start().await;

    let err = update_job_and_wait(&client_for(&server), &Job::default(), &fast(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_job_wait_times_out() {
    let server = MockServer::start().await;
    mount_once(&server, "POST", "/v2/jobs", json!({"id": "5", "status": "JobSubmitted"}), 1).await;
    mount_once(&server, "GET", "/v2/jobs/5", json!({"id": "5", "status": "JobStarting"}), 1000).await;

    let options = PollOptions::default()
        .with_interval(Duration::from_millis(10))
        .with_max_attempts(3);
    let err = add_job_and_wait(&client_for(&server), &Job::default(), &options, None)
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_delete_job_and_wait_follows_operation() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/jobs/101"))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({"operationId": "op-1", "status": "RUNNING"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_once(&server, "GET", "/v1/operationStatus/op-1", json!({"operationId": "op-1", "status": "RUNNING"}), 1).await;
    mount_once(&server, "GET", "/v1/operationStatus/op-1", json!({"operationId": "op-1", "status": "SUCCESS"}), 10).await;

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let callback = Box::new(move |event: ProgressEvent| {
        let tag = match event {
            ProgressEvent::Started { .. } => "started",
            ProgressEvent::Polling { .. } => "polling",
            ProgressEvent::Completed { .. } => "completed",
            ProgressEvent::Failed { .. } => "failed",
        };
        sink.lock().unwrap().push(tag);
    });

    let status = delete_job_and_wait(&client_for(&server), "101", &fast(), Some(callback))
        .await
        .unwrap();

    assert_eq!(status.status.as_deref(), Some("SUCCESS"));
    assert_eq!(
        *events.lock().unwrap(),
        vec!["started", "polling", "polling", "completed"]
    );
}

#[tokio::test]
async fn test_delete_job_operation_failure() {
    let server = MockServer::start().await;
    mount_once(&server, "DELETE", "/v2/jobs/9", json!({"id": "op-9", "status": "RUNNING"}), 1).await;
    mount_once(
        &server,
        "GET",
        "/v1/operationStatus/op-9",
        json!({"id": "op-9", "status": "FAILED", "msg": "vm stuck"}),
        10,
    )
    .await;

    let err = delete_job_and_wait(&client_for(&server), "9", &fast(), None)
        .await
        .unwrap_err();

    assert!(err.is_operation_failure());
    assert_eq!(err.to_string(), "Job deletion failed (status FAILED): vm stuck");
}

// ============================================================================
// Cloud accounts
// ============================================================================

#[tokio::test]
async fn test_add_cloud_account_and_wait_resolves_by_display_name() {
    let server = MockServer::start().await;
    let status_url = format!("{}/v1/operationStatus/acct-op", server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/tenants/4/clouds/2/accounts"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "status": "RUNNING",
            "resourceUrl": status_url,
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_once(&server, "GET", "/v1/operationStatus/acct-op", json!({"status": "RUNNING"}), 1).await;
    mount_once(&server, "GET", "/v1/operationStatus/acct-op", json!({"status": "SUCCESS"}), 10).await;
    Mock::given(method("GET"))
        .and(path("/v1/tenants/4/clouds/2/accounts"))
        .and(query_param("displayName", "aws-dev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cloudAccounts": [
                {"id": "31", "displayName": "aws-dev", "tenantId": "4", "cloudId": "2"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let account = CloudAccount {
        tenant_id: Some("4".to_string()),
        cloud_id: Some("2".to_string()),
        display_name: Some("aws-dev".to_string()),
        ..Default::default()
    };
    let created = add_cloud_account_and_wait(&client_for(&server), &account, &fast(), None)
        .await
        .unwrap();

    assert_eq!(created.id.as_deref(), Some("31"));
}

#[tokio::test]
async fn test_add_cloud_account_missing_after_success() {
    let server = MockServer::start().await;
    let status_url = format!("{}/v1/operationStatus/acct-op", server.uri());

    mount_once(
        &server,
        "POST",
        "/v1/tenants/4/clouds/2/accounts",
        json!({"status": "RUNNING", "resourceUrl": status_url}),
        1,
    )
    .await;
    mount_once(&server, "GET", "/v1/operationStatus/acct-op", json!({"status": "SUCCESS"}), 10).await;
    mount_once(&server, "GET", "/v1/tenants/4/clouds/2/accounts", json!({"cloudAccounts": []}), 10).await;

    let account = CloudAccount {
        tenant_id: Some("4".to_string()),
        cloud_id: Some("2".to_string()),
        display_name: Some("aws-dev".to_string()),
        ..Default::default()
    };
    let err = add_cloud_account_and_wait(&client_for(&server), &account, &fast(), None)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_add_cloud_account_completed_on_submission() {
    let server = MockServer::start().await;
    mount_once(&server, "POST", "/v1/tenants/4/clouds/2/accounts", json!({"status": "SUCCESS"}), 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/tenants/4/clouds/2/accounts"))
        .and(query_param("displayName", "aws-dev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cloudAccounts": [{"id": "32", "displayName": "aws-dev"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let account = CloudAccount {
        tenant_id: Some("4".to_string()),
        cloud_id: Some("2".to_string()),
        display_name: Some("aws-dev".to_string()),
        ..Default::default()
    };
    let created = add_cloud_account_and_wait(&client_for(&server), &account, &fast(), None)
        .await
        .unwrap();

    assert_eq!(created.id.as_deref(), Some("32"));
}

#[tokio::test]
async fn test_add_cloud_account_running_without_status_url() {
    let server = MockServer::start().await;
    mount_once(&server, "POST", "/v1/tenants/4/clouds/2/accounts", json!({"status": "RUNNING"}), 1).await;

    let account = CloudAccount {
        tenant_id: Some("4".to_string()),
        cloud_id: Some("2".to_string()),
        display_name: Some("aws-dev".to_string()),
        ..Default::default()
    };
    let err = add_cloud_account_and_wait(&client_for(&server), &account, &fast(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_add_cloud_account_validation() {
    let server = MockServer::start().await;
    let account = CloudAccount {
        tenant_id: Some("4".to_string()),
        display_name: Some("aws-dev".to_string()),
        ..Default::default()
    };

    let err = add_cloud_account_and_wait(&client_for(&server), &account, &fast(), None)
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Tenants
// ============================================================================

#[tokio::test]
async fn test_delete_tenant_accepted_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/tenants/12"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"msg": TENANT_DELETE_ACCEPTED})),
        )
        .mount(&server)
        .await;

    let err = delete_tenant_and_wait(&client_for(&server), "12", &fast(), None)
        .await
        .unwrap_err();

    match err {
        CoreError::DeletionAccepted(conditions) => {
            assert!(conditions.starts_with(TENANT_DELETE_ACCEPTED));
            assert!(conditions.contains("sub-tenants"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_tenant_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/tenants/12"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = delete_tenant_and_wait(&client_for(&server), "12", &fast(), None)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_tenant_polls_operation() {
    let server = MockServer::start().await;
    mount_once(&server, "DELETE", "/v1/tenants/12", json!({"id": "t-op", "status": "RUNNING"}), 1).await;
    mount_once(&server, "GET", "/v1/operationStatus/t-op", json!({"id": "t-op", "status": "SUCCESS"}), 10).await;

    let result = delete_tenant_and_wait(&client_for(&server), "12", &fast(), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result.status.as_deref(), Some("SUCCESS"));
}

#[tokio::test]
async fn test_delete_tenant_other_error_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/tenants/12"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let err = delete_tenant_and_wait(&client_for(&server), "12", &fast(), None)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

// ============================================================================
// Polling over the transport
// ============================================================================

/// URL of a local port with nothing listening on it
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}

#[tokio::test]
async fn test_connection_failure_mid_poll_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/operationStatus/op-9"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "op-9", "status": "RUNNING"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reachable = OperationStatusHandler::new(client_for(&server));
    let unreachable =
        OperationStatusHandler::new(CloudCenterClient::new(closed_port_url(), "admin", "secret").unwrap());
    let reachable = &reachable;
    let unreachable = &unreachable;
    let reads = Cell::new(0u32);
    let reads_ref = &reads;

    let err = poll_until_terminal(OperationKind::Operation, "op-9", &fast(), None, move || {
        reads_ref.set(reads_ref.get() + 1);
        let handler = if reads_ref.get() == 1 { reachable } else { unreachable };
        handler.get("op-9")
    })
    .await
    .unwrap_err();

    assert_eq!(reads.get(), 2);
    assert!(matches!(err, CoreError::Transport(_)), "got {:?}", err);
}
