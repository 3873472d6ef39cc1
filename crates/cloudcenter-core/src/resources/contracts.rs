//! Contracts users agree to on activation

use serde::{Deserialize, Serialize};

use super::{fetch_list, require, require_arg, require_some, seg, tenant_path};
use crate::client::CloudCenterClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Months
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_only_to_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_users: Option<i64>,
}

impl Contract {
    fn validate(&self) -> Result<()> {
        require(&self.name, "Contract.name")?;
        require_some(&self.length, "Contract.length")?;
        require(&self.terms, "Contract.terms")?;
        Ok(())
    }
}

/// Handler for `/v1/tenants/{tenantId}/contracts`
pub struct ContractHandler {
    client: CloudCenterClient,
}

impl ContractHandler {
    pub fn new(client: CloudCenterClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<Contract>> {
        fetch_list(&self.client, &tenant_path(tenant_id, "contracts")?, "contracts").await
    }

    pub async fn get(&self, tenant_id: &str, contract_id: &str) -> Result<Contract> {
        let contract_id = require_arg(contract_id, "Contract.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "contracts")?, seg(contract_id));
        self.client.get(&path).await
    }

    pub async fn add(&self, contract: &Contract) -> Result<Contract> {
        let tenant_id = require(&contract.tenant_id, "Contract.tenantId")?;
        contract.validate()?;
        self.client.post(&tenant_path(tenant_id, "contracts")?, contract).await
    }

    pub async fn update(&self, contract: &Contract) -> Result<Contract> {
        let id = require(&contract.id, "Contract.id")?;
        let tenant_id = require(&contract.tenant_id, "Contract.tenantId")?;
        contract.validate()?;
        let path = format!("{}/{}", tenant_path(tenant_id, "contracts")?, seg(id));
        self.client.put(&path, contract).await
    }

    pub async fn delete(&self, tenant_id: &str, contract_id: &str) -> Result<()> {
        let contract_id = require_arg(contract_id, "Contract.id")?;
        let path = format!("{}/{}", tenant_path(tenant_id, "contracts")?, seg(contract_id));
        self.client.delete(&path).await
    }
}
