//! Mappings from logical images to provider images in a region

use serde::{Deserialize, Serialize};

use super::cloud_instance_types::CloudInstanceType;
use super::{NameValue, fetch_list, region_path, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudImageMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_image_id: Option<String>,
    /// Provider image, e.g. an AMI id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_provider_image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_and_revoke: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_cloud_account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<NameValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<Vec<InstanceTypeMapping>>,
}

/// Per instance type override of a mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceTypeMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_instance_type: Option<CloudInstanceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_override: Option<f64>,
    #[serde(rename = "CloudProviderImageIdOverride", skip_serializing_if = "Option::is_none")]
    pub cloud_provider_image_id_override: Option<String>,
}

impl CloudImageMapping {
    fn collection_path(&self) -> Result<String> {
        let tenant_id = require(&self.tenant_id, "CloudImageMapping.tenantId")?;
        let cloud_id = require(&self.cloud_id, "CloudImageMapping.cloudId")?;
        let region_id = require(&self.region_id, "CloudImageMapping.regionId")?;
        Ok(format!("{}/images", region_path(tenant_id, cloud_id, region_id)?))
    }
}

/// Handler for `.../regions/{regionId}/images`
pub struct CloudImageMappingHandler {
    client: CloudCenterClient,
}

impl CloudImageMappingHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str, cloud_id: &str, region_id: &str) -> Result<Vec<CloudImageMapping>> {
        let path = format!("{}/images", region_path(tenant_id, cloud_id, region_id)?);
        fetch_list(&self.client, &path, "cloudImages").await
    }

    pub async fn get(
        &self,
        tenant_id: &str,
        cloud_id: &str,
        region_id: &str,
        mapping_id: &str,
    ) -> Result<CloudImageMapping> {
        let mapping_id = require_arg(mapping_id, "CloudImageMapping.id")?;
        let path = format!(
            "{}/images/{}",
            region_path(tenant_id, cloud_id, region_id)?,
            seg(mapping_id)
        );
        self.client.get(&path).await
    }

    pub async fn add(&self, mapping: &CloudImageMapping) -> Result<CloudImageMapping> {
        let path = mapping.collection_path()?;
        self.client.post(&path, mapping).await
    }

    pub async fn update(&self, mapping: &CloudImageMapping) -> Result<CloudImageMapping> {
        let id = require(&mapping.id, "CloudImageMapping.id")?;
        let path = format!("{}/{}", mapping.collection_path()?, seg(id));
        self.client.put(&path, mapping).await
    }

    pub async fn delete(&self, tenant_id: &str, cloud_id: &str, region_id: &str, mapping_id: &str) -> Result<()> {
        let mapping_id = require_arg(mapping_id, "CloudImageMapping.id")?;
        let path = format!(
            "{}/images/{}",
            region_path(tenant_id, cloud_id, region_id)?,
            seg(mapping_id)
        );
        self.client.delete(&path).await
    }
}
