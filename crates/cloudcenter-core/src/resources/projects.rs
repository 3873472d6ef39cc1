//! Projects

use serde::{Deserialize, Serialize};

use super::phases::Phase;
use super::{fetch_list, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_owner_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<Quota>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_cost: Option<Balance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apps: Option<Vec<ProjectApp>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<Phase>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectApp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
}

/// Budget state of a project or phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurable_unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurable_unit: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Handler for `/v1/projects`
pub struct ProjectHandler {
    client: CloudCenterClient,
}

impl ProjectHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        fetch_list(&self.client, "/v1/projects", "projects").await
    }

    pub async fn get(&self, project_id: &str) -> Result<Project> {
        let project_id = require_arg(project_id, "Project.id")?;
        self.client.get(&format!("/v1/projects/{}", seg(project_id))).await
    }

    pub async fn add(&self, project: &Project) -> Result<Project> {
        require(&project.name, "Project.name")?;
        self.client.post("/v1/projects", project).await
    }

    pub async fn update(&self, project: &Project) -> Result<Project> {
        let id = require(&project.id, "Project.id")?;
        require(&project.name, "Project.name")?;
        self.client
            .put(&format!("/v1/projects/{}", seg(id)), project)
            .await
    }

    pub async fn delete(&self, project_id: &str) -> Result<()> {
        let project_id = require_arg(project_id, "Project.id")?;
        self.client
            .delete(&format!("/v1/projects/{}", seg(project_id)))
            .await
    }
}
