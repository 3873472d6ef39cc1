//! Virtual machines and their cost summary
//!
//! The list endpoint does not use the usual list envelope: it returns a cost
//! summary, a page of VM details and the filter facets in one document.

use serde::{Deserialize, Serialize};

use super::actions::Action;
use super::jobs::JobMetadata;
use super::{require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_summary: Option<CostSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<VirtualMachinePage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    #[serde(rename = "totalNumberOfVMs", skip_serializing_if = "Option::is_none")]
    pub total_number_of_vms: Option<i64>,
    #[serde(rename = "totalNumberOfRunningVMs", skip_serializing_if = "Option::is_none")]
    pub total_number_of_running_vms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cloud_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_cloud_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_node_hours: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachinePage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_machine_details: Option<Vec<VirtualMachine>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachine {
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
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_end_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_cpus: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_node_status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nics: Option<Vec<Nic>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<JobMetadata>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_properties: Option<Vec<NodeProperty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_start_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_name_and_account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_end_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_job_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_environment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_environment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_logo_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip_addresses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ip_addresses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_timestamp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminate_protection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aging_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaling_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_status: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Facets the UI offers for narrowing the VM list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_families: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_accounts: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_names: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_names: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_sizes: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpuses: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_sizes: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_names: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_names: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_environments: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_statuses: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_job_statuses: Option<Vec<Filter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_and_account_names: Option<Vec<Filter>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Handler for `/v1/virtualMachines`
pub struct VirtualMachineHandler {
    client: CloudCenterClient,
}

impl VirtualMachineHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    /// Full report: cost summary, VM details and filter facets
    pub async fn report(&self) -> Result<VirtualMachineReport> {
        self.client.get("/v1/virtualMachines").await
    }

    pub async fn list(&self) -> Result<Vec<VirtualMachine>> {
        Ok(self
            .report()
            .await?
            .details
            .and_then(|d| d.virtual_machine_details)
            .unwrap_or_default())
    }

    pub async fn get(&self, vm_id: &str) -> Result<VirtualMachine> {
        let vm_id = require_arg(vm_id, "VirtualMachine.id")?;
        self.client
            .get(&format!("/v1/virtualMachines/{}", seg(vm_id)))
            .await
    }

    pub async fn cost_summary(&self) -> Result<CostSummary> {
        self.report().await?.cost_summary.ok_or_else(|| {
            CoreError::UnexpectedResponse("virtual machine report has no costSummary".to_string())
        })
    }
}

