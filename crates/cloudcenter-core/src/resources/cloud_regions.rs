//! Cloud regions configured under a tenant's cloud

use serde::{Deserialize, Serialize};

use super::{NameValue, fetch_list, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudRegion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_region: Option<ImportRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Provider name of the region, e.g. `us-east-1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<Gateway>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<RegionStorage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_cloud: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_users: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_properties: Option<Vec<NameValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_bundle_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_actions: Option<Vec<ExternalAction>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRegion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gateway {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_account_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStorage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_nodes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_specific_settings: Option<Vec<NameValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Action hook attached to a region or service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_value: Option<String>,
}

impl CloudRegion {
    fn collection_path(&self) -> Result<String> {
        let tenant_id = require(&self.tenant_id, "CloudRegion.tenantId")?;
        let cloud_id = require(&self.cloud_id, "CloudRegion.cloudId")?;
        Ok(regions_path(tenant_id, cloud_id))
    }
}

fn regions_path(tenant_id: &str, cloud_id: &str) -> String {
    format!("/v1/tenants/{}/clouds/{}/regions", seg(tenant_id), seg(cloud_id))
}

/// Handler for `/v1/tenants/{tenantId}/clouds/{cloudId}/regions`
pub struct CloudRegionHandler {
    client: CloudCenterClient,
}

impl CloudRegionHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str, cloud_id: &str) -> Result<Vec<CloudRegion>> {
        require_arg(tenant_id, "CloudRegion.tenantId")?;
        require_arg(cloud_id, "CloudRegion.cloudId")?;
        fetch_list(&self.client, &regions_path(tenant_id, cloud_id), "cloudRegions").await
    }

    pub async fn get(&self, tenant_id: &str, cloud_id: &str, region_id: &str) -> Result<CloudRegion> {
        require_arg(tenant_id, "CloudRegion.tenantId")?;
        require_arg(cloud_id, "CloudRegion.cloudId")?;
        let region_id = require_arg(region_id, "CloudRegion.id")?;
        self.client
            .get(&format!("{}/{}", regions_path(tenant_id, cloud_id), seg(region_id)))
            .await
    }

    pub async fn add(&self, region: &CloudRegion) -> Result<CloudRegion> {
        let path = region.collection_path()?;
        require(&region.region_name, "CloudRegion.regionName")?;
        self.client.post(&path, region).await
    }

    pub async fn update(&self, region: &CloudRegion) -> Result<CloudRegion> {
        let id = require(&region.id, "CloudRegion.id")?;
        let path = format!("{}/{}", region.collection_path()?, seg(id));
        self.client.put(&path, region).await
    }

    pub async fn delete(&self, tenant_id: &str, cloud_id: &str, region_id: &str) -> Result<()> {
        require_arg(tenant_id, "CloudRegion.tenantId")?;
        require_arg(cloud_id, "CloudRegion.cloudId")?;
        let region_id = require_arg(region_id, "CloudRegion.id")?;
        self.client
            .delete(&format!("{}/{}", regions_path(tenant_id, cloud_id), seg(region_id)))
            .await
    }
}
