//! Services (application tiers such as databases or web servers)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::cloud_regions::ExternalAction;
use super::images::Image;
use super::{fetch_list, require, require_arg, seg, tenant_path};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_service: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_image_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_service: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_service: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_bundle_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_actions: Option<Vec<ExternalAction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_ports: Option<Vec<ServicePort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_param_specs: Option<Vec<ServiceParamSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub egress_restrictions: Option<Vec<EgressRestriction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<Repository>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_services: Option<Vec<Service>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_actions: Option<Vec<ExternalAction>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceParamSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webservice_list_params: Option<Vec<WebserviceListParam>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_editable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_param: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_constraint: Option<Value>,
}

/// Remote list source for a parameter's allowed values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebserviceListParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_params: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_string: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EgressRestriction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub egress_service_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
}

impl Service {
    fn validate(&self) -> Result<()> {
        require(&self.name, "Service.name")?;
        require(&self.display_name, "Service.displayName")?;
        Ok(())
    }
}

/// Handler for `/v1/tenants/{tenantId}/services`
pub struct ServiceHandler {
    client: CloudCenterClient,
}

impl ServiceHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<Service>> {
        fetch_list(&self.client, &tenant_path(tenant_id, "services")?, "services").await
    }

    pub async fn get(&self, tenant_id: &str, service_id: &str) -> Result<Service> {
        let service_id = require_arg(service_id, "Service.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "services")?, seg(service_id));
        self.client.get(&path).await
    }

    pub async fn add(&self, service: &Service) -> Result<Service> {
        let tenant_id = require(&service.tenant_id, "Service.tenantId")?;
        service.validate()?;
        self.client.post(&tenant_path(tenant_id, "services")?, service).await
    }

    pub async fn update(&self, service: &Service) -> Result<Service> {
        let id = require(&service.id, "Service.id")?;
        let tenant_id = require(&service.tenant_id, "Service.tenantId")?;
        service.validate()?;
        let path = format!("{}/{}", tenant_path(tenant_id, "services")?, seg(id));
        self.client.put(&path, service).await
    }

    pub async fn delete(&self, tenant_id: &str, service_id: &str) -> Result<()> {
        let service_id = require_arg(service_id, "Service.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "services")?, seg(service_id));
        self.client.delete(&path).await
    }
}
