//! Transport behaviour against a mock CloudCenter manager

use cloudcenter_core::{CloudCenterClient, CoreError};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("admin:secret")
const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

fn client_for(server: &MockServer) -> CloudCenterClient {
    CloudCenterClient::new(server.uri(), "admin", "secret").unwrap()
}

// ============================================================================
// Request shape
// ============================================================================

#[tokio::test]
async fn test_requests_carry_basic_auth_and_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/7"))
        .and(header("authorization", BASIC_AUTH))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "7"})))
        .expect(1)
        .mount(&server)
        .await;

    let body: Value = client_for(&server).get("/v1/users/7").await.unwrap();
    assert_eq!(body["id"], "7");
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/things"))
        .and(body_json(json!({"name": "a", "enabled": false})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let created: Value = client_for(&server)
        .post("/v1/things", &json!({"name": "a", "enabled": false}))
        .await
        .unwrap();
    assert_eq!(created["id"], "1");
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/jobs"))
        .and(query_param("search", "[deploymentEntity.name,eq,web prod]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobs": []})))
        .expect(1)
        .mount(&server)
        .await;

    let body: Value = client_for(&server)
        .get_with_query("/v2/jobs", &[("search", "[deploymentEntity.name,eq,web prod]")])
        .await
        .unwrap();
    assert_eq!(body["jobs"], json!([]));
}

#[tokio::test]
async fn test_absolute_status_url_is_used_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/operationStatus/op-9"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "RUNNING"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = CloudCenterClient::new("https://unused.invalid", "admin", "secret").unwrap();
    let url = format!("{}/v1/operationStatus/op-9", server.uri());
    let body: Value = client.get(&url).await.unwrap();
    assert_eq!(body["status"], "RUNNING");
}

// ============================================================================
// Status policy
// ============================================================================

#[tokio::test]
async fn test_success_statuses() {
    for status in [200u16, 201, 202, 204] {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/things/1"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let result = client_for(&server).delete("/v1/things/1").await;
        assert!(result.is_ok(), "status {} should succeed", status);
    }
}

#[tokio::test]
async fn test_other_2xx_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/things"))
        .respond_with(ResponseTemplate::new(203).set_body_string("odd"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_raw("/v1/things").await.unwrap_err();
    assert_eq!(err.status_code(), Some(203));
}

#[tokio::test]
async fn test_error_body_is_kept_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tenants/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"msg\":\"Tenant not found\"}"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get::<Value>("/v1/tenants/99")
        .await
        .unwrap_err();

    match &err {
        CoreError::Api { status, message } => {
            assert_eq!(*status, 404);
            assert_eq!(message, "{\"msg\":\"Tenant not found\"}");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(err.is_not_found());
    assert_eq!(err.remote_msg().as_deref(), Some("Tenant not found"));
}

#[tokio::test]
async fn test_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_raw("/v1/users").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .get::<cloudcenter_core::User>("/v1/users/1")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Decode { .. }));

    let raw = client.get_raw("/v1/users/1").await.unwrap();
    assert_eq!(raw, Value::String("<html>login</html>".to_string()));
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/tenants/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result: Option<Value> = client_for(&server)
        .delete_with_response("/v1/tenants/3")
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Reserve a free port, then release it so nothing listens there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = CloudCenterClient::new(uri, "admin", "secret").unwrap();
    let err = client.get_raw("/v1/users").await.unwrap_err();
    assert!(matches!(err, CoreError::Transport(_)));
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn test_upload_is_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/apps/portation"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"appId": "42"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = cloudcenter_core::AppHandler::new(client)
        .import("app.zip", b"PK\x03\x04".to_vec())
        .await
        .unwrap();
    assert_eq!(result["appId"], "42");

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"app.zip\""));
}
