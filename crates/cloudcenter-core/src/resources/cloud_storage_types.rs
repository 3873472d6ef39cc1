//! Storage types offered in a cloud region

use serde::{Deserialize, Serialize};

use super::{fetch_list, region_path, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudStorageType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_month: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_volume_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_volume_size: Option<i64>,
    #[serde(rename = "maxIOPS", skip_serializing_if = "Option::is_none")]
    pub max_iops: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_throughput: Option<i64>,
    #[serde(rename = "provisionedIOPS", skip_serializing_if = "Option::is_none")]
    pub provisioned_iops: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops_cost_per_month: Option<f64>,
}

impl CloudStorageType {
    fn collection_path(&self) -> Result<String> {
        let tenant_id = require(&self.tenant_id, "CloudStorageType.tenantId")?;
        let cloud_id = require(&self.cloud_id, "CloudStorageType.cloudId")?;
        let region_id = require(&self.region_id, "CloudStorageType.regionId")?;
        Ok(format!("{}/storageTypes", region_path(tenant_id, cloud_id, region_id)?))
    }
}

/// Handler for `.../regions/{regionId}/storageTypes`
pub struct CloudStorageTypeHandler {
    client: CloudCenterClient,
}

impl CloudStorageTypeHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str, cloud_id: &str, region_id: &str) -> Result<Vec<CloudStorageType>> {
        let path = format!("{}/storageTypes", region_path(tenant_id, cloud_id, region_id)?);
        fetch_list(&self.client, &path, "cloudStorageTypes").await
    }

    pub async fn get(
        &self,
        tenant_id: &str,
        cloud_id: &str,
        region_id: &str,
        storage_type_id: &str,
    ) -> Result<CloudStorageType> {
        let storage_type_id = require_arg(storage_type_id, "CloudStorageType.id")?;
        let path = format!(
            "{}/storageTypes/{}",
            region_path(tenant_id, cloud_id, region_id)?,
            seg(storage_type_id)
        );
        self.client.get(&path).await
    }

    pub async fn add(&self, storage_type: &CloudStorageType) -> Result<CloudStorageType> {
        let path = storage_type.collection_path()?;
        self.client.post(&path, storage_type).await
    }

    pub async fn update(&self, storage_type: &CloudStorageType) -> Result<CloudStorageType> {
        let id = require(&storage_type.id, "CloudStorageType.id")?;
        let path = format!("{}/{}", storage_type.collection_path()?, seg(id));
        self.client.put(&path, storage_type).await
    }

    pub async fn delete(
        &self,
        tenant_id: &str,
        cloud_id: &str,
        region_id: &str,
        storage_type_id: &str,
    ) -> Result<()> {
        let storage_type_id = require_arg(storage_type_id, "CloudStorageType.id")?;
        let path = format!(
            "{}/storageTypes/{}",
            region_path(tenant_id, cloud_id, region_id)?,
            seg(storage_type_id)
        );
        self.client.delete(&path).await
    }
}
