//! Actions library
//!
//! Actions are the scripts and commands users can run against deployments
//! and VMs; the remote API calls their records `actionJaxbs`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::services::WebserviceListParam;
use super::{fetch_list, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
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
    pub action_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<String>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_out: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_defined: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_operation_supported: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available_to_user: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_parameters: Option<Vec<ActionParameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_resource_mappings: Option<Vec<ActionResourceMapping>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_custom_param_specs: Option<Vec<ActionCustomParamSpec>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_param: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResourceMapping {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_resource_filters: Option<Vec<ActionResourceFilter>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResourceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_resource: Option<VmResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_editable: Option<bool>,
}

/// Which VMs an action applies to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmResource {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_profiles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_regions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_accounts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_family_names: Option<Vec<String>>,
    #[serde(rename = "nodesStates", skip_serializing_if = "Option::is_none")]
    pub node_states: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_resource_mappings: Option<Vec<CloudResourceMapping>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudResourceMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_states: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCustomParamSpec {
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
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_suffix_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_editable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_param: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiselect_supported: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_constraint: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webservice_list_params: Option<WebserviceListParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<String>,
}

impl Action {
    fn validate(&self) -> Result<()> {
        require(&self.name, "Action.name")?;
        require(&self.action_type, "Action.actionType")?;
        Ok(())
    }
}

/// Handler for `/v1/actions`
pub struct ActionHandler {
    client: CloudCenterClient,
}

impl ActionHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Action>> {
        fetch_list(&self.client, "/v1/actions", "actionJaxbs").await
    }

    pub async fn get(&self, action_id: &str) -> Result<Action> {
        let action_id = require_arg(action_id, "Action.id")?;
        self.client.get(&format!("/v1/actions/{}", seg(action_id))).await
    }

    pub async fn add(&self, action: &Action) -> Result<Action> {
        action.validate()?;
        self.client.post("/v1/actions", action).await
    }

    pub async fn update(&self, action: &Action) -> Result<Action> {
        let id = require(&action.id, "Action.id")?;
        action.validate()?;
        self.client.put(&format!("/v1/actions/{}", seg(id)), action).await
    }

    pub async fn delete(&self, action_id: &str) -> Result<()> {
        let action_id = require_arg(action_id, "Action.id")?;
        self.client.delete(&format!("/v1/actions/{}", seg(action_id))).await
    }
}
