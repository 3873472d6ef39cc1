//! Logical images

use serde::{Deserialize, Serialize};

use super::{fetch_list, require, require_arg, require_some, seg, tenant_path};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_image_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_image: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_of_nics: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
}

impl Image {
    fn tenant_id(&self) -> Result<String> {
        require_some(&self.tenant_id, "Image.tenantId").map(i32::to_string)
    }
}

/// Handler for `/v1/tenants/{tenantId}/images`
pub struct ImageHandler {
    client: CloudCenterClient,
}

impl ImageHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<Image>> {
        fetch_list(&self.client, &tenant_path(tenant_id, "images")?, "images").await
    }

    pub async fn get(&self, tenant_id: &str, image_id: &str) -> Result<Image> {
        let image_id = require_arg(image_id, "Image.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "images")?, seg(image_id));
        self.client.get(&path).await
    }

    pub async fn add(&self, image: &Image) -> Result<Image> {
        let tenant_id = image.tenant_id()?;
        self.client.post(&tenant_path(&tenant_id, "images")?, image).await
    }

    pub async fn update(&self, image: &Image) -> Result<Image> {
        let id = require(&image.id, "Image.id")?;
        let tenant_id = image.tenant_id()?;
        let path = format!("{}/{}", tenant_path(&tenant_id, "images")?, seg(id));
        self.client.put(&path, image).await
    }

    pub async fn delete(&self, tenant_id: &str, image_id: &str) -> Result<()> {
        let image_id = require_arg(image_id, "Image.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "images")?, seg(image_id));
        self.client.delete(&path).await
    }
}
