//! Activation profiles applied to newly activated users

use serde::{Deserialize, Serialize};

use super::{fetch_list, require, require_arg, require_some, seg, tenant_path};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dep_env_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activate_regions: Option<Vec<ActivateRegion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_apps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agree_to_contract: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_activation_email: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateRegion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
}

impl ActivationProfile {
    fn tenant_id(&self) -> Result<String> {
        require_some(&self.tenant_id, "ActivationProfile.tenantId").map(i64::to_string)
    }
}

/// Handler for `/v1/tenants/{tenantId}/activationProfiles`
pub struct ActivationProfileHandler {
    client: CloudCenterClient,
}

impl ActivationProfileHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<ActivationProfile>> {
        let path = tenant_path(tenant_id, "activationProfiles")?;
        fetch_list(&self.client, &path, "activationProfiles").await
    }

    pub async fn get(&self, tenant_id: &str, profile_id: &str) -> Result<ActivationProfile> {
        let profile_id = require_arg(profile_id, "ActivationProfile.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "activationProfiles")?, seg(profile_id));
        self.client.get(&path).await
    }

    pub async fn add(&self, profile: &ActivationProfile) -> Result<ActivationProfile> {
        let tenant_id = profile.tenant_id()?;
        require(&profile.name, "ActivationProfile.name")?;
        let path = tenant_path(&tenant_id, "activationProfiles")?;
        self.client.post(&path, profile).await
    }

    pub async fn update(&self, profile: &ActivationProfile) -> Result<ActivationProfile> {
        let id = require(&profile.id, "ActivationProfile.id")?;
        let tenant_id = profile.tenant_id()?;
        require(&profile.name, "ActivationProfile.name")?;
        let path = format!("{}/{}", tenant_path(&tenant_id, "activationProfiles")?, seg(id));
        self.client.put(&path, profile).await
    }

    pub async fn delete(&self, tenant_id: &str, profile_id: &str) -> Result<()> {
        let profile_id = require_arg(profile_id, "ActivationProfile.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "activationProfiles")?, seg(profile_id));
        self.client.delete(&path).await
    }
}
