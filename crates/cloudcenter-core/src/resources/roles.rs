//! Roles and their object permissions

use serde::{Deserialize, Serialize};

use super::groups::Group;
use super::users::User;
use super::{fetch_list, require, require_arg, seg, tenant_path};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
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
    pub object_perms: Option<Vec<ObjectPerm>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Group>>,
    /// Built in, cannot be deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oob_role: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPerm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
}

/// Handler for `/v1/tenants/{tenantId}/roles`
pub struct RoleHandler {
    client: CloudCenterClient,
}

impl RoleHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<Role>> {
        fetch_list(&self.client, &tenant_path(tenant_id, "roles")?, "roles").await
    }

    pub async fn get(&self, tenant_id: &str, role_id: &str) -> Result<Role> {
        let role_id = require_arg(role_id, "Role.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "roles")?, seg(role_id));
        self.client.get(&path).await
    }

    pub async fn add(&self, role: &Role) -> Result<Role> {
        let tenant_id = require(&role.tenant_id, "Role.tenantId")?;
        require(&role.name, "Role.name")?;
        self.client.post(&tenant_path(tenant_id, "roles")?, role).await
    }

    pub async fn update(&self, role: &Role) -> Result<Role> {
        let id = require(&role.id, "Role.id")?;
        let tenant_id = require(&role.tenant_id, "Role.tenantId")?;
        require(&role.name, "Role.name")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "roles")?, seg(id));
        self.client.put(&path, role).await
    }

    pub async fn delete(&self, tenant_id: &str, role_id: &str) -> Result<()> {
        let role_id = require_arg(role_id, "Role.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "roles")?, seg(role_id));
        self.client.delete(&path).await
    }
}
