//! Suspension policies: scheduled suspend and resume windows

use serde::{Deserialize, Serialize};

use super::aging_policies::PolicyResource;
use super::{fetch_list, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspensionPolicy {
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
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedules: Option<Vec<Schedule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockout_periods: Option<Vec<BlockoutPeriod>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_policy_active_on_resources: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_maps: Option<Vec<PolicyResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeats: Option<i64>,
}

/// Window during which the policy does not apply (epoch millis)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockoutPeriod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<f64>,
}

/// Handler for `/v2/suspensionpolicies`
pub struct SuspensionPolicyHandler {
    client: CloudCenterClient,
}

impl SuspensionPolicyHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<SuspensionPolicy>> {
        fetch_list(&self.client, "/v2/suspensionpolicies", "suspensionpolicies").await
    }

    pub async fn get(&self, policy_id: &str) -> Result<SuspensionPolicy> {
        let policy_id = require_arg(policy_id, "SuspensionPolicy.id")?;
        self.client
            .get(&format!("/v2/suspensionpolicies/{}", seg(policy_id)))
            .await
    }

    pub async fn add(&self, policy: &SuspensionPolicy) -> Result<SuspensionPolicy> {
        require(&policy.name, "SuspensionPolicy.name")?;
        self.client.post("/v2/suspensionpolicies", policy).await
    }

    pub async fn update(&self, policy: &SuspensionPolicy) -> Result<SuspensionPolicy> {
        let id = require(&policy.id, "SuspensionPolicy.id")?;
        self.client
            .put(&format!("/v2/suspensionpolicies/{}", seg(id)), policy)
            .await
    }

    pub async fn delete(&self, policy_id: &str) -> Result<()> {
        let policy_id = require_arg(policy_id, "SuspensionPolicy.id")?;
        self.client
            .delete(&format!("/v2/suspensionpolicies/{}", seg(policy_id)))
            .await
    }
}
