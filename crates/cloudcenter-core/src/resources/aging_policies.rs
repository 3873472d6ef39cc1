//! Aging policies: time or cost limits on deployments

use serde::{Deserialize, Serialize};

use super::{fetch_list, require, require_arg, require_some, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingPolicy {
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
    /// `TIME` or `COST`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminate_when_policy_ends: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_grace_period_for_termination: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_limit: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_policy_extension: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_limit: Option<ExtensionLimit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_grace_period_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_policy_expiry_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Vec<Notification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_policy_active_on_resources: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<PolicyResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
}

/// Quantity with a unit such as `HOURS` or `DOLLARS`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionLimit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_of_extensions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_of_each_extension: Option<Amount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Vec<Amount>>,
}

/// A deployment or VM a policy is attached to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_start_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_policy_end_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accrued_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_extensions_used: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approval_pending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_previous_extension_denied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_policy_reaching_expiry: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_policy_reaching_grace_expiry: Option<bool>,
}

impl AgingPolicy {
    fn validate(&self) -> Result<()> {
        require(&self.name, "AgingPolicy.name")?;
        require_some(&self.enabled, "AgingPolicy.enabled")?;
        require(&self.kind, "AgingPolicy.type")?;
        require_some(&self.limit, "AgingPolicy.limit")?;
        Ok(())
    }
}

/// Handler for `/v2/agingPolicies`
pub struct AgingPolicyHandler {
    client: CloudCenterClient,
}

impl AgingPolicyHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<AgingPolicy>> {
        fetch_list(&self.client, "/v2/agingPolicies", "policies").await
    }

    pub async fn get(&self, policy_id: &str) -> Result<AgingPolicy> {
        let policy_id = require_arg(policy_id, "AgingPolicy.id")?;
        self.client
            .get(&format!("/v2/agingPolicies/{}", seg(policy_id)))
            .await
    }

    pub async fn add(&self, policy: &AgingPolicy) -> Result<AgingPolicy> {
        policy.validate()?;
        self.client.post("/v2/agingPolicies", policy).await
    }

    pub async fn update(&self, policy: &AgingPolicy) -> Result<AgingPolicy> {
        let id = require(&policy.id, "AgingPolicy.id")?;
        policy.validate()?;
        self.client
            .put(&format!("/v2/agingPolicies/{}", seg(id)), policy)
            .await
    }

    pub async fn delete(&self, policy_id: &str) -> Result<()> {
        let policy_id = require_arg(policy_id, "AgingPolicy.id")?;
        self.client
            .delete(&format!("/v2/agingPolicies/{}", seg(policy_id)))
            .await
    }
}
