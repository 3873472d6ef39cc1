//! Resource handler behaviour: paths, envelopes, validation and wire shape

use cloudcenter_core::resources::bundles::{Bundle, BundleHandler};
use cloudcenter_core::resources::cloud_instance_types::CloudInstanceTypeHandler;
use cloudcenter_core::{
    CloudCenterClient, CoreError, JobHandler, Tenant, TenantHandler, UserHandler,
    VirtualMachineHandler,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CloudCenterClient {
    CloudCenterClient::new(server.uri(), "admin", "secret").unwrap()
}

// ============================================================================
// Wire shape
// ============================================================================

#[test]
fn test_absent_fields_are_omitted_but_zero_values_are_sent() {
    let tenant = Tenant {
        name: Some("acme".to_string()),
        enable_purchase_order: Some(false),
        parent_tenant_id: Some(0),
        external_id: Some(String::new()),
        ..Default::default()
    };

    let value = serde_json::to_value(&tenant).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "acme",
            "enablePurchaseOrder": false,
            "parentTenantId": 0,
            "externalId": ""
        })
    );
}

#[test]
fn test_type_field_round_trips_through_kind() {
    let bundle: Bundle =
        serde_json::from_value(json!({"type": "BUDGET_BASED", "name": "Gold", "limit": 100.0}))
            .unwrap();
    assert_eq!(bundle.kind.as_deref(), Some("BUDGET_BASED"));

    let back = serde_json::to_value(&bundle).unwrap();
    assert_eq!(back["type"], "BUDGET_BASED");
    assert!(back.get("kind").is_none());
}

// ============================================================================
// Lists
// ============================================================================

#[tokio::test]
async fn test_list_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "size": 2,
            "users": [
                {"id": "1", "username": "alice"},
                {"id": "2", "username": "bob"}
            ]
        })))
        .mount(&server)
        .await;

    let users = UserHandler::new(client_for(&server)).list().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].id.as_deref(), Some("2"));
}

#[tokio::test]
async fn test_list_without_array_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tenants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"size": 0})))
        .mount(&server)
        .await;

    let tenants = TenantHandler::new(client_for(&server)).list().await.unwrap();
    assert!(tenants.is_empty());
}

#[tokio::test]
async fn test_job_search_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/jobs"))
        .and(query_param("search", "[deploymentEntity.name,eq,web-prod]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{"id": "101", "status": "JobRunning"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = JobHandler::new(client_for(&server))
        .find_by_name("web-prod")
        .await
        .unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status.as_deref(), Some("JobRunning"));
}

#[tokio::test]
async fn test_bundle_find_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tenants/1/bundles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bundles": [
                {"id": "1", "name": "Silver"},
                {"id": "2", "name": "Gold"}
            ]
        })))
        .mount(&server)
        .await;

    let handler = BundleHandler::new(client_for(&server));
    let gold = handler.find_by_name("1", "Gold").await.unwrap();
    assert_eq!(gold.id.as_deref(), Some("2"));

    let err = handler.find_by_name("1", "Platinum").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(ref m) if m == "BUNDLE NOT FOUND"));
}

#[tokio::test]
async fn test_sync_instance_types() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/tenants/1/clouds/2/regions/3/syncInstanceTypes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cloudInstanceTypes": [{"id": "11", "name": "t2.small"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let synced = CloudInstanceTypeHandler::new(client_for(&server))
        .sync("1", "2", "3")
        .await
        .unwrap();
    assert_eq!(synced.len(), 1);
    assert_eq!(synced[0].name.as_deref(), Some("t2.small"));
}

#[tokio::test]
async fn test_virtual_machine_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/virtualMachines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "costSummary": {"totalNumberOfVMs": 3, "totalNumberOfRunningVMs": 2, "totalCloudCost": 12.5},
            "details": {"size": 1, "virtualMachineDetails": [{"id": "vm-1"}]}
        })))
        .mount(&server)
        .await;

    let handler = VirtualMachineHandler::new(client_for(&server));
    let vms = handler.list().await.unwrap();
    assert_eq!(vms.len(), 1);

    let summary = handler.cost_summary().await.unwrap();
    assert_eq!(summary.total_number_of_vms, Some(3));
    assert_eq!(summary.total_number_of_running_vms, Some(2));
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_tenant_validation_sends_nothing() {
    let server = MockServer::start().await;
    let handler = TenantHandler::new(client_for(&server));

    let missing_short_name = Tenant {
        name: Some("acme".to_string()),
        user_id: Some("2".to_string()),
        ..Default::default()
    };
    let err = handler.add(&missing_short_name).await.unwrap_err();
    assert_eq!(err.to_string(), "Validation error: Tenant.shortName is missing");

    let err = handler.get("").await.unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_tenant_add_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/tenants"))
        .and(body_json(json!({"name": "acme", "userId": "2", "shortName": "acme"})))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&server)
        .await;

    let tenant = Tenant {
        name: Some("acme".to_string()),
        user_id: Some("2".to_string()),
        short_name: Some("acme".to_string()),
        ..Default::default()
    };
    TenantHandler::new(client_for(&server)).add(&tenant).await.unwrap();
}

#[tokio::test]
async fn test_bundle_validation_checks_type() {
    let server = MockServer::start().await;
    let bundle = Bundle {
        tenant_id: Some("1".to_string()),
        name: Some("Gold".to_string()),
        ..Default::default()
    };

    let err = BundleHandler::new(client_for(&server))
        .add(&bundle)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Validation error: Bundle.type is missing");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_path_segments_are_escaped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a b"})))
        .expect(1)
        .mount(&server)
        .await;

    let user = UserHandler::new(client_for(&server)).get("a b").await.unwrap();
    assert_eq!(user.id.as_deref(), Some("a b"));
}
