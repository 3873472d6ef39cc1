//! Deployment jobs
//!
//! Job submissions and updates return the job record straight away with a
//! pending status; [`crate::workflows::add_job_and_wait`] follows it to a
//! terminal `Job*` status. Deletion returns an [`OperationStatus`] instead.

use serde::{Deserialize, Serialize};

use super::operation_status::OperationStatus;
use super::{NameValue, ResourceRef, fetch_list, fetch_list_with_query, require, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::{CoreError, Result};
use crate::poll::Pollable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `Job*` status token, see [`crate::poll::StatusVocabulary::Job`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_request: Option<ApprovalRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_request_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_request_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favourite_creation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_upgrade_in_progress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_environment: Option<ResourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_entity: Option<DeploymentEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminate_protection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_existing_deployment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ResourceRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<JobParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Vec<TierJob>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_properties: Option<Vec<NameValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_jobs: Option<Vec<ChildJob>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<JobMetadata>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_job: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_job: Option<ResourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_machines: Option<Vec<JobVirtualMachine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_profiles: Option<Vec<ResourceRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bare_metal_machines: Option<Vec<BareMetalMachine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_hours: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_deployment_environment: Option<ResourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_deployment_environment: Option<ResourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiating_user: Option<ResourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approving_user: Option<ResourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

/// What the job deploys; `name` is the searchable deployment name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEntity {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Per-tier settings of a multi-tier deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<JobParameters>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_params: Option<CloudParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_params: Option<Vec<NameValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_params: Option<Vec<NameValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_volume_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_properties: Option<Vec<NameValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<ResourceRef>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobVirtualMachine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_machine_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip_addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ip_addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_network_interfaces: Option<Vec<NodeNetworkInterface>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_details: Option<NodeCostDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_details: Option<Vec<TaskDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Vec<NameValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeNetworkInterface {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip_addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ip_addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_index: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCostDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mgmt_bill_node_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_bill_node_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_cost_bill_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_cost_bill_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cloud_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_app_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_jobs_cost: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BareMetalMachine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_details: Option<NodeCostDetails>,
}

impl Pollable for Job {
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn status_message(&self) -> Option<&str> {
        self.job_status_message.as_deref()
    }
}

/// Search expression matching a deployment by name
fn name_search(name: &str) -> String {
    format!("[deploymentEntity.name,eq,{}]", name)
}

/// Handler for `/v2/jobs`
pub struct JobHandler {
    client: CloudCenterClient,
}

impl JobHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Job>> {
        fetch_list(&self.client, "/v2/jobs", "jobs").await
    }

    pub async fn get(&self, job_id: &str) -> Result<Job> {
        let job_id = require_arg(job_id, "Job.id")?;
        self.client.get(&format!("/v2/jobs/{}", seg(job_id))).await
    }

    /// Jobs whose deployment name matches exactly
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Job>> {
        let name = require_arg(name, "Job name")?;
        let search = name_search(name);
        fetch_list_with_query(&self.client, "/v2/jobs", &[("search", search.as_str())], "jobs").await
    }

    /// Submit a deployment and return the freshly created job without waiting
    pub async fn add_async(&self, job: &Job) -> Result<Job> {
        self.client.post("/v2/jobs", job).await
    }

    /// Submit changes to a job and return its record without waiting
    pub async fn update_async(&self, job: &Job) -> Result<Job> {
        let id = require(&job.id, "Job.id")?;
        self.client.put(&format!("/v2/jobs/{}", seg(id)), job).await
    }

    /// Request termination of a job and return the operation record
    pub async fn delete_async(&self, job_id: &str) -> Result<OperationStatus> {
        let job_id = require_arg(job_id, "Job.id")?;
        self.client
            .delete_with_response(&format!("/v2/jobs/{}", seg(job_id)))
            .await?
            .ok_or_else(|| {
                CoreError::UnexpectedResponse(format!(
                    "deleting job {} returned no operation status",
                    job_id
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_search() {
        assert_eq!(name_search("web-prod"), "[deploymentEntity.name,eq,web-prod]");
    }

    #[test]
    fn test_job_decodes_nested_parameters() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": "101",
            "status": "JobSubmitted",
            "jobStatusMessage": "",
            "deploymentEntity": {"type": "APP", "name": "web-prod"},
            "parameters": {
                "cloudParams": {"cloud": "aws", "instance": "t2.small"},
                "appParams": [{"name": "port", "value": "8080"}]
            },
            "tagIds": [1.0, 2.0]
        }))
        .unwrap();

        assert_eq!(job.status(), Some("JobSubmitted"));
        assert_eq!(job.status_message(), Some(""));
        assert_eq!(
            job.deployment_entity.as_ref().and_then(|e| e.kind.as_deref()),
            Some("APP")
        );
        let params = job.parameters.unwrap();
        assert_eq!(params.cloud_params.unwrap().instance.as_deref(), Some("t2.small"));
        assert_eq!(params.app_params.unwrap()[0].value.as_deref(), Some("8080"));
    }
}
