//! Cloud definitions known to the manager

use serde::{Deserialize, Serialize};

use super::{NameValue, fetch_list};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cloud {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_group_name: Option<String>,
    /// e.g. `Amazon`, `Vmware`, `AzureRM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_cloud: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<NameValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_instance_types: Option<Vec<CloudInstanceTypeSummary>>,
}

/// Instance type as embedded in a cloud definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudInstanceTypeSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<i64>,
    #[serde(rename = "numOfCPUs", skip_serializing_if = "Option::is_none")]
    pub num_of_cpus: Option<i64>,
    #[serde(rename = "numOfNICs", skip_serializing_if = "Option::is_none")]
    pub num_of_nics: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_storage_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_storage_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuda_support: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssd_support: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support32_bit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support64_bit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dummy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_hardware_provision: Option<bool>,
}

/// Handler for `/v1/clouds`
pub struct CloudHandler {
    client: CloudCenterClient,
}

impl CloudHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Cloud>> {
        fetch_list(&self.client, "/v1/clouds", "cloudConfigs").await
    }
}
