//! Action policies: actions triggered by lifecycle events

use serde::{Deserialize, Serialize};

use super::{NameValue, fetch_list, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPolicy {
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
    /// `JOB` or `VM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<PolicyAction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_inputs: Option<Vec<NameValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_params: Option<Vec<NameValue>>,
}

impl ActionPolicy {
    fn validate(&self) -> Result<()> {
        require(&self.name, "ActionPolicy.name")?;
        require(&self.entity_type, "ActionPolicy.entityType")?;
        require(&self.event_name, "ActionPolicy.eventName")?;
        Ok(())
    }
}

/// Handler for `/v1/actionpolicies`
pub struct ActionPolicyHandler {
    client: CloudCenterClient,
}

impl ActionPolicyHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<ActionPolicy>> {
        fetch_list(&self.client, "/v1/actionpolicies", "customPolicyJaxbs").await
    }

    pub async fn get(&self, policy_id: &str) -> Result<ActionPolicy> {
        let policy_id = require_arg(policy_id, "ActionPolicy.id")?;
        self.client
            .get(&format!("/v1/actionpolicies/{}", seg(policy_id)))
            .await
    }

    pub async fn add(&self, policy: &ActionPolicy) -> Result<ActionPolicy> {
        policy.validate()?;
        self.client.post("/v1/actionpolicies", policy).await
    }

    pub async fn update(&self, policy: &ActionPolicy) -> Result<ActionPolicy> {
        let id = require(&policy.id, "ActionPolicy.id")?;
        policy.validate()?;
        self.client
            .put(&format!("/v1/actionpolicies/{}", seg(id)), policy)
            .await
    }

    pub async fn delete(&self, policy_id: &str) -> Result<()> {
        let policy_id = require_arg(policy_id, "ActionPolicy.id")?;
        self.client
            .delete(&format!("/v1/actionpolicies/{}", seg(policy_id)))
            .await
    }
}
