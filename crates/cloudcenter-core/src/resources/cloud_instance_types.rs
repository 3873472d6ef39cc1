//! Instance types offered in a cloud region

use serde::{Deserialize, Serialize};

use super::{fetch_list, region_path, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudInstanceType {
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
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_hour: Option<f64>,
    /// MiB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_of_cpus: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_of_nics: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_storage_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_ssd: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_cuda: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports32_bit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports64_bit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_storage_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_hardware_provision: Option<bool>,
}

impl CloudInstanceType {
    fn collection_path(&self) -> Result<String> {
        let tenant_id = require(&self.tenant_id, "CloudInstanceType.tenantId")?;
        let cloud_id = require(&self.cloud_id, "CloudInstanceType.cloudId")?;
        let region_id = require(&self.region_id, "CloudInstanceType.regionId")?;
        Ok(format!("{}/instanceTypes", region_path(tenant_id, cloud_id, region_id)?))
    }

    fn validate(&self) -> Result<()> {
        require(&self.name, "CloudInstanceType.name")?;
        require(&self.kind, "CloudInstanceType.type")?;
        Ok(())
    }
}

/// Handler for `.../regions/{regionId}/instanceTypes`
pub struct CloudInstanceTypeHandler {
    client: CloudCenterClient,
}

impl CloudInstanceTypeHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str, cloud_id: &str, region_id: &str) -> Result<Vec<CloudInstanceType>> {
        let path = format!("{}/instanceTypes", region_path(tenant_id, cloud_id, region_id)?);
        fetch_list(&self.client, &path, "cloudInstanceTypes").await
    }

    pub async fn get(
        &self,
        tenant_id: &str,
        cloud_id: &str,
        region_id: &str,
        instance_type_id: &str,
    ) -> Result<CloudInstanceType> {
        let instance_type_id = require_arg(instance_type_id, "CloudInstanceType.id")?;
        let path = format!(
            "{}/instanceTypes/{}",
            region_path(tenant_id, cloud_id, region_id)?,
            seg(instance_type_id)
        );
        self.client.get(&path).await
    }

    pub async fn add(&self, instance_type: &CloudInstanceType) -> Result<CloudInstanceType> {
        let path = instance_type.collection_path()?;
        instance_type.validate()?;
        self.client.post(&path, instance_type).await
    }

    pub async fn update(&self, instance_type: &CloudInstanceType) -> Result<CloudInstanceType> {
        let id = require(&instance_type.id, "CloudInstanceType.id")?;
        let path = format!("{}/{}", instance_type.collection_path()?, seg(id));
        instance_type.validate()?;
        self.client.put(&path, instance_type).await
    }

    pub async fn delete(
        &self,
        tenant_id: &str,
        cloud_id: &str,
        region_id: &str,
        instance_type_id: &str,
    ) -> Result<()> {
        let instance_type_id = require_arg(instance_type_id, "CloudInstanceType.id")?;
        let path = format!(
            "{}/instanceTypes/{}",
            region_path(tenant_id, cloud_id, region_id)?,
            seg(instance_type_id)
        );
        self.client.delete(&path).await
    }

    /// Refresh the region's instance types from the provider
    pub async fn sync(&self, tenant_id: &str, cloud_id: &str, region_id: &str) -> Result<Vec<CloudInstanceType>> {
        let path = format!("{}/syncInstanceTypes", region_path(tenant_id, cloud_id, region_id)?);
        let envelope: serde_json::Value = self.client.post_empty(&path).await?;
        super::extract_list(envelope, "cloudInstanceTypes", &path)
    }
}
