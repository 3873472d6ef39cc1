//! Subscription plans

use serde::{Deserialize, Serialize};

use super::{fetch_list, require, require_arg, seg, tenant_path};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_hour_increment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_bundle_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onetime_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overage_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overage_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted_to_app_store_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_to_vendor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_rollover: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_only_to_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_users: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_projects: Option<i64>,
}

/// Handler for `/v1/tenants/{tenantId}/plans`
pub struct PlanHandler {
    client: CloudCenterClient,
}

impl PlanHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<Plan>> {
        fetch_list(&self.client, &tenant_path(tenant_id, "plans")?, "plans").await
    }

    pub async fn get(&self, tenant_id: &str, plan_id: &str) -> Result<Plan> {
        let plan_id = require_arg(plan_id, "Plan.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "plans")?, seg(plan_id));
        self.client.get(&path).await
    }

    pub async fn add(&self, plan: &Plan) -> Result<Plan> {
        let tenant_id = require(&plan.tenant_id, "Plan.tenantId")?;
        self.client.post(&tenant_path(tenant_id, "plans")?, plan).await
    }

    pub async fn update(&self, plan: &Plan) -> Result<Plan> {
        let id = require(&plan.id, "Plan.id")?;
        let tenant_id = require(&plan.tenant_id, "Plan.tenantId")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "plans")?, seg(id));
        self.client.put(&path, plan).await
    }

    pub async fn delete(&self, tenant_id: &str, plan_id: &str) -> Result<()> {
        let plan_id = require_arg(plan_id, "Plan.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "plans")?, seg(plan_id));
        self.client.delete(&path).await
    }
}
