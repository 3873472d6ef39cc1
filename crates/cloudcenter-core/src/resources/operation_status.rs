//! Operation status records and the status check

use serde::{Deserialize, Serialize};

use super::{NameValue, require_arg, seg};
use crate::client::CloudCenterClient;
use crate::error::Result;
use crate::poll::Pollable;

/// Progress record for a long-running operation
///
/// The submission call creates it; only the remote side changes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `RUNNING`, `SUCCESS` or a failure token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_parameters: Option<Vec<NameValue>>,
    /// Status URL handed back by cloud account submissions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,
}

impl OperationStatus {
    /// Identifier to poll with. `id` wins over `operationId`.
    pub fn poll_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.operation_id.as_deref().filter(|s| !s.is_empty()))
    }
}

impl Pollable for OperationStatus {
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn status_message(&self) -> Option<&str> {
        self.msg.as_deref()
    }
}

/// Handler for `/v1/operationStatus`
pub struct OperationStatusHandler {
    client: CloudCenterClient,
}

impl OperationStatusHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    /// Read the current state of an operation
    pub async fn get(&self, operation_id: &str) -> Result<OperationStatus> {
        let operation_id = require_arg(operation_id, "OperationStatus.id")?;
        self.client
            .get(&format!("/v1/operationStatus/{}", seg(operation_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_id_prefers_id() {
        let op: OperationStatus = serde_json::from_str(
            r#"{"operationId":"op-1","id":"42","status":"RUNNING","progress":0}"#,
        )
        .unwrap();
        assert_eq!(op.poll_id(), Some("42"));
        assert_eq!(op.progress, Some(0));

        let op: OperationStatus = serde_json::from_str(r#"{"operationId":"op-1"}"#).unwrap();
        assert_eq!(op.poll_id(), Some("op-1"));

        assert_eq!(OperationStatus::default().poll_id(), None);
    }

    #[test]
    fn test_resource_url_field() {
        let op: OperationStatus = serde_json::from_str(
            r#"{"status":"RUNNING","resourceUrl":"https://ccm/v1/operationStatus/9"}"#,
        )
        .unwrap();
        assert_eq!(op.resource_url.as_deref(), Some("https://ccm/v1/operationStatus/9"));
        assert_eq!(op.status(), Some("RUNNING"));
        assert_eq!(op.status_message(), None);
    }
}
