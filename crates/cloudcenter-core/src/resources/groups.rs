//! User groups

use serde::{Deserialize, Serialize};

use super::roles::Role;
use super::users::User;
use super::{fetch_list, require, require_arg, seg, tenant_path};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
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
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_sso: Option<bool>,
}

/// Handler for `/v1/tenants/{tenantId}/groups`
pub struct GroupHandler {
    client: CloudCenterClient,
}

impl GroupHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<Group>> {
        fetch_list(&self.client, &tenant_path(tenant_id, "groups")?, "groups").await
    }

    pub async fn get(&self, tenant_id: &str, group_id: &str) -> Result<Group> {
        let group_id = require_arg(group_id, "Group.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "groups")?, seg(group_id));
        self.client.get(&path).await
    }

    pub async fn add(&self, group: &Group) -> Result<Group> {
        let tenant_id = require(&group.tenant_id, "Group.tenantId")?;
        self.client.post(&tenant_path(tenant_id, "groups")?, group).await
    }

    pub async fn update(&self, group: &Group) -> Result<Group> {
        let id = require(&group.id, "Group.id")?;
        let tenant_id = require(&group.tenant_id, "Group.tenantId")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "groups")?, seg(id));
        self.client.put(&path, group).await
    }

    pub async fn delete(&self, tenant_id: &str, group_id: &str) -> Result<()> {
        let group_id = require_arg(group_id, "Group.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "groups")?, seg(group_id));
        self.client.delete(&path).await
    }
}
