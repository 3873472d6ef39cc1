//! Application profiles

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{fetch_list, require_arg};
use crate::client::CloudCenterClient;
use crate::error::Result;

/// Endpoint that accepts exported application archives
pub const IMPORT_PATH: &str = "/v1/apps/portation";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
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
    pub service_tier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Handler for `/v1/apps`
pub struct AppHandler {
    client: CloudCenterClient,
}

impl AppHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<App>> {
        fetch_list(&self.client, "/v1/apps", "apps").await
    }

    /// Upload an exported application archive.
    ///
    /// The archive is passed through untouched; the response is returned as
    /// untyped JSON because its shape depends on the archive.
    pub async fn import(&self, file_name: &str, archive: Vec<u8>) -> Result<Value> {
        let file_name = require_arg(file_name, "App import file name")?;
        self.client.upload(IMPORT_PATH, file_name, archive).await
    }
}
