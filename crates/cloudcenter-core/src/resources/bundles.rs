//! Bundles sold within a tenant

use serde::{Deserialize, Serialize};

use super::{fetch_list, require, require_arg, seg, tenant_path};
use crate::client::CloudCenterClient;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    /// `BUDGET_BASED` or `TIME_BASED`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_months: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_only_to_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_users: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_app_ids: Option<Vec<String>>,
}

impl Bundle {
    fn validate(&self) -> Result<()> {
        require(&self.kind, "Bundle.type")?;
        require(&self.name, "Bundle.name")?;
        Ok(())
    }
}

/// Handler for `/v1/tenants/{tenantId}/bundles`
pub struct BundleHandler {
    client: CloudCenterClient,
}

impl BundleHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<Bundle>> {
        fetch_list(&self.client, &tenant_path(tenant_id, "bundles")?, "bundles").await
    }

    pub async fn get(&self, tenant_id: &str, bundle_id: &str) -> Result<Bundle> {
        let bundle_id = require_arg(bundle_id, "Bundle.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "bundles")?, seg(bundle_id));
        self.client.get(&path).await
    }

    /// First bundle whose name matches exactly
    pub async fn find_by_name(&self, tenant_id: &str, name: &str) -> Result<Bundle> {
        self.list(tenant_id)
            .await?
            .into_iter()
            .find(|b| b.name.as_deref() == Some(name))
            .ok_or_else(|| CoreError::NotFound("BUNDLE NOT FOUND".to_string()))
    }

    pub async fn add(&self, bundle: &Bundle) -> Result<Bundle> {
        let tenant_id = require(&bundle.tenant_id, "Bundle.tenantId")?;
        bundle.validate()?;
        self.client.post(&tenant_path(tenant_id, "bundles")?, bundle).await
    }

    pub async fn update(&self, bundle: &Bundle) -> Result<Bundle> {
        let id = require(&bundle.id, "Bundle.id")?;
        let tenant_id = require(&bundle.tenant_id, "Bundle.tenantId")?;
        bundle.validate()?;
        let path = format!("{}/{}", tenant_path(tenant_id, "bundles")?, seg(id));
        self.client.put(&path, bundle).await
    }

    pub async fn delete(&self, tenant_id: &str, bundle_id: &str) -> Result<()> {
        let bundle_id = require_arg(bundle_id, "Bundle.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "bundles")?, seg(bundle_id));
        self.client.delete(&path).await
    }
}
