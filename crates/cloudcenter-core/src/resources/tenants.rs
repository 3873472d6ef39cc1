//! Tenants
//!
//! Deletion is special: the remote side may accept the request without
//! finishing it. See [`crate::workflows::delete_tenant_and_wait`].

use serde::{Deserialize, Serialize};

use super::operation_status::OperationStatus;
use super::{NameValue, fetch_list, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Administrator of the tenant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev_share_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_transaction_fee_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_app_fee_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_consolidated_billing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_purchase_order: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_email_notifications_to_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_tenant_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_activation_profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_monthly_billing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_charge_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_page_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_default_user_security_group: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_all_email_notification: Option<bool>,
    #[serde(rename = "trademarkURL", skip_serializing_if = "Option::is_none")]
    pub trademark_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<NameValue>>,
}

impl Tenant {
    fn validate(&self) -> Result<()> {
        require(&self.name, "Tenant.name")?;
        require(&self.user_id, "Tenant.userId")?;
        require(&self.short_name, "Tenant.shortName")?;
        Ok(())
    }
}

/// Handler for `/v1/tenants`
pub struct TenantHandler {
    client: CloudCenterClient,
}

impl TenantHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Tenant>> {
        fetch_list(&self.client, "/v1/tenants", "tenants").await
    }

    pub async fn get(&self, tenant_id: &str) -> Result<Tenant> {
        let tenant_id = require_arg(tenant_id, "Tenant.id")?;
        self.client.get(&format!("/v1/tenants/{}", seg(tenant_id))).await
    }

    /// Create a tenant. The remote API answers without a body worth keeping.
    pub async fn add(&self, tenant: &Tenant) -> Result<()> {
        tenant.validate()?;
        self.client.post_discard("/v1/tenants", tenant).await
    }

    pub async fn update(&self, tenant: &Tenant) -> Result<Tenant> {
        tenant.validate()?;
        let id = require(&tenant.id, "Tenant.id")?;
        self.client
            .put(&format!("/v1/tenants/{}", seg(id)), tenant)
            .await
    }

    /// Issue the delete and return whatever operation record came back.
    ///
    /// `None` means the remote side answered with an empty body.
    pub async fn delete_async(&self, tenant_id: &str) -> Result<Option<OperationStatus>> {
        let tenant_id = require_arg(tenant_id, "Tenant.id")?;
        self.client
            .delete_with_response(&format!("/v1/tenants/{}", seg(tenant_id)))
            .await
    }
}
