//! Deployment environments

use serde::{Deserialize, Serialize};

use super::{NameValue, fetch_list, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_clouds: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_settings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_clouds: Option<Vec<AssociatedCloud>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_deployments: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_details: Option<CostDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_types: Option<Vec<NetworkType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_type_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted_user: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cloud_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_app_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_jobs_cost: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_network_mapped: Option<f64>,
}

/// A region and account that deployments in the environment may use
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedCloud {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_association_defaults: Option<Vec<NameValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

/// Handler for `/v1/environments`
pub struct EnvironmentHandler {
    client: CloudCenterClient,
}

impl EnvironmentHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Environment>> {
        fetch_list(&self.client, "/v1/environments", "deploymentEnvironments").await
    }

    pub async fn get(&self, environment_id: &str) -> Result<Environment> {
        let environment_id = require_arg(environment_id, "Environment.id")?;
        self.client
            .get(&format!("/v1/environments/{}", seg(environment_id)))
            .await
    }

    pub async fn add(&self, environment: &Environment) -> Result<Environment> {
        require(&environment.name, "Environment.name")?;
        self.client.post("/v1/environments", environment).await
    }

    pub async fn update(&self, environment: &Environment) -> Result<Environment> {
        let id = require(&environment.id, "Environment.id")?;
        require(&environment.name, "Environment.name")?;
        self.client
            .put(&format!("/v1/environments/{}", seg(id)), environment)
            .await
    }

    pub async fn delete(&self, environment_id: &str) -> Result<()> {
        let environment_id = require_arg(environment_id, "Environment.id")?;
        self.client
            .delete(&format!("/v1/environments/{}", seg(environment_id)))
            .await
    }
}
