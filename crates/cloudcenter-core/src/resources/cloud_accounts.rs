//! Cloud accounts
//!
//! Creating or updating an account is asynchronous on the remote side: the
//! submission returns an [`OperationStatus`] whose `resourceUrl` is polled
//! until the operation settles. The account itself has no id until then, so
//! the finished account is found again by its display name.

use serde::{Deserialize, Serialize};

use super::operation_status::OperationStatus;
use super::{NameValue, fetch_list, fetch_list_with_query, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    /// Unique per tenant and cloud; used to find the account after creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_cost: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_users: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_permission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_properties: Option<Vec<NameValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl CloudAccount {
    /// Collection path derived from the account's own tenant and cloud
    fn collection_path(&self) -> Result<String> {
        let tenant_id = require(&self.tenant_id, "CloudAccount.tenantId")?;
        let cloud_id = require(&self.cloud_id, "CloudAccount.cloudId")?;
        Ok(accounts_path(tenant_id, cloud_id))
    }
}

fn accounts_path(tenant_id: &str, cloud_id: &str) -> String {
    format!("/v1/tenants/{}/clouds/{}/accounts", seg(tenant_id), seg(cloud_id))
}

/// Handler for `/v1/tenants/{tenantId}/clouds/{cloudId}/accounts`
pub struct CloudAccountHandler {
    client: CloudCenterClient,
}

impl CloudAccountHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str, cloud_id: &str) -> Result<Vec<CloudAccount>> {
        require_arg(tenant_id, "CloudAccount.tenantId")?;
        require_arg(cloud_id, "CloudAccount.cloudId")?;
        fetch_list(&self.client, &accounts_path(tenant_id, cloud_id), "cloudAccounts").await
    }

    pub async fn get(&self, tenant_id: &str, cloud_id: &str, account_id: &str) -> Result<CloudAccount> {
        require_arg(tenant_id, "CloudAccount.tenantId")?;
        require_arg(cloud_id, "CloudAccount.cloudId")?;
        let account_id = require_arg(account_id, "CloudAccount.id")?;
        self.client
            .get(&format!("{}/{}", accounts_path(tenant_id, cloud_id), seg(account_id)))
            .await
    }

    /// Accounts whose display name matches exactly
    pub async fn find_by_display_name(
        &self,
        tenant_id: &str,
        cloud_id: &str,
        display_name: &str,
    ) -> Result<Vec<CloudAccount>> {
        require_arg(tenant_id, "CloudAccount.tenantId")?;
        require_arg(cloud_id, "CloudAccount.cloudId")?;
        let display_name = require_arg(display_name, "CloudAccount.displayName")?;
        fetch_list_with_query(
            &self.client,
            &accounts_path(tenant_id, cloud_id),
            &[("displayName", display_name)],
            "cloudAccounts",
        )
        .await
    }

    /// Submit a new account and return the operation record without waiting
    pub async fn add_async(&self, account: &CloudAccount) -> Result<OperationStatus> {
        require(&account.display_name, "CloudAccount.displayName")?;
        let path = account.collection_path()?;
        self.client.post(&path, account).await
    }

    /// Submit changes to an account and return the operation record without waiting
    pub async fn update_async(&self, account: &CloudAccount) -> Result<OperationStatus> {
        let id = require(&account.id, "CloudAccount.id")?;
        require(&account.display_name, "CloudAccount.displayName")?;
        let path = format!("{}/{}", account.collection_path()?, seg(id));
        self.client.put(&path, account).await
    }

    pub async fn delete(&self, tenant_id: &str, cloud_id: &str, account_id: &str) -> Result<()> {
        require_arg(tenant_id, "CloudAccount.tenantId")?;
        require_arg(cloud_id, "CloudAccount.cloudId")?;
        let account_id = require_arg(account_id, "CloudAccount.id")?;
        self.client
            .delete(&format!("{}/{}", accounts_path(tenant_id, cloud_id), seg(account_id)))
            .await
    }
}
