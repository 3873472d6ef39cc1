//! Project phases

use serde::{Deserialize, Serialize};

use super::projects::Balance;
use super::{fetch_list, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_plan: Option<PhasePlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_bundles: Option<Vec<PhaseBundle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_cost: Option<Balance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployments: Option<Vec<Deployment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_environment: Option<PhaseEnvironment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasePlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseEnvironment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_logo_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_actions: Option<Vec<String>>,
}

fn phases_path(project_id: &str) -> Result<String> {
    let project_id = require_arg(project_id, "Phase.projectId")?;
    Ok(format!("/v1/projects/{}/phases", seg(project_id)))
}

/// Handler for `/v1/projects/{projectId}/phases`
pub struct PhaseHandler {
    client: CloudCenterClient,
}

impl PhaseHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, project_id: &str) -> Result<Vec<Phase>> {
        fetch_list(&self.client, &phases_path(project_id)?, "phases").await
    }

    pub async fn get(&self, project_id: &str, phase_id: &str) -> Result<Phase> {
        let phase_id = require_arg(phase_id, "Phase.id")?;
        let path = format!("{}/{}", phases_path(project_id)?, seg(phase_id));
        self.client.get(&path).await
    }

    pub async fn add(&self, phase: &Phase) -> Result<Phase> {
        let project_id = require(&phase.project_id, "Phase.projectId")?;
        self.client.post(&phases_path(project_id)?, phase).await
    }

    pub async fn update(&self, phase: &Phase) -> Result<Phase> {
        let id = require(&phase.id, "Phase.id")?;
        let project_id = require(&phase.project_id, "Phase.projectId")?;
        let path = format!("{}/{}", phases_path(project_id)?, seg(id));
        self.client.put(&path, phase).await
    }

    pub async fn delete(&self, project_id: &str, phase_id: &str) -> Result<()> {
        let phase_id = require_arg(phase_id, "Phase.id")?;
        let path = format!("{}/{}", phases_path(project_id)?, seg(phase_id));
        self.client.delete(&path).await
    }
}
