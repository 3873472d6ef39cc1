//! Typed handlers for the CloudCenter resource families
//!
//! Each submodule owns the records of one family plus a `*Handler` that
//! wraps a [`CloudCenterClient`]. Handlers follow one shape:
//!
//! ```rust,ignore
//! let handler = BundleHandler::new(client.clone());
//! let bundles = handler.list("1").await?;
//! let bundle = handler.find_by_name("1", "Gold").await?;
//! ```
//!
//! Every record field is optional. `None` is omitted on the wire, while a
//! present zero value (`false`, `0`, `""`) is sent as-is.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::CloudCenterClient;
use crate::error::{CoreError, Result};

pub mod action_policies;
pub mod actions;
pub mod activation_profiles;
pub mod aging_policies;
pub mod apps;
pub mod bundles;
pub mod cloud_accounts;
pub mod cloud_image_mappings;
pub mod cloud_instance_types;
pub mod cloud_regions;
pub mod cloud_storage_types;
pub mod clouds;
pub mod contracts;
pub mod environments;
pub mod groups;
pub mod images;
pub mod jobs;
pub mod operation_status;
pub mod phases;
pub mod plans;
pub mod projects;
pub mod roles;
pub mod services;
pub mod suspension_policies;
pub mod tenants;
pub mod users;
pub mod virtual_machines;

/// Generic `{name, value}` pair used across many records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Reference to another record by id and URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

/// Fail with `Validation` unless the field is present and non-empty.
pub(crate) fn require<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{} is missing", what))),
    }
}

/// Fail with `Validation` unless a non-string field is present.
pub(crate) fn require_some<'a, T>(value: &'a Option<T>, what: &str) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| CoreError::Validation(format!("{} is missing", what)))
}

/// Fail with `Validation` if a path segment is blank.
pub(crate) fn require_arg<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{} is missing", what)));
    }
    Ok(value)
}

/// Percent-encode one path segment
pub(crate) fn seg(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Path of a tenant-scoped collection, e.g. `/v1/tenants/1/bundles`
pub(crate) fn tenant_path(tenant_id: &str, collection: &str) -> Result<String> {
    require_arg(tenant_id, "tenantId")?;
    Ok(format!("/v1/tenants/{}/{}", seg(tenant_id), collection))
}

/// Base path of a region's sub-collections
pub(crate) fn region_path(tenant_id: &str, cloud_id: &str, region_id: &str) -> Result<String> {
    require_arg(tenant_id, "tenantId")?;
    require_arg(cloud_id, "cloudId")?;
    require_arg(region_id, "regionId")?;
    Ok(format!(
        "/v1/tenants/{}/clouds/{}/regions/{}",
        seg(tenant_id),
        seg(cloud_id),
        seg(region_id)
    ))
}

/// Fetch a list envelope and pull out the array stored under `key`.
///
/// A missing or `null` array is an empty list.
pub(crate) async fn fetch_list<T: DeserializeOwned>(
    client: &CloudCenterClient,
    path: &str,
    key: &str,
) -> Result<Vec<T>> {
    let envelope: Value = client.get(path).await?;
    extract_list(envelope, key, path)
}

/// Like [`fetch_list`] with query parameters
pub(crate) async fn fetch_list_with_query<T: DeserializeOwned>(
    client: &CloudCenterClient,
    path: &str,
    query: &[(&str, &str)],
    key: &str,
) -> Result<Vec<T>> {
    let envelope: Value = client.get_with_query(path, query).await?;
    extract_list(envelope, key, path)
}

pub(crate) fn extract_list<T: DeserializeOwned>(
    mut envelope: Value,
    key: &str,
    context: &str,
) -> Result<Vec<T>> {
    match envelope.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(items) => serde_json::from_value(items).map_err(|source| CoreError::Decode {
            context: format!("{} ({})", context, key),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require() {
        let present = Some("abc".to_string());
        assert_eq!(require(&present, "Tenant.id").unwrap(), "abc");

        let err = require(&None, "Tenant.id").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Tenant.id is missing");

        let blank = Some("  ".to_string());
        assert!(require(&blank, "Tenant.id").is_err());
    }

    #[test]
    fn test_require_some_accepts_zero() {
        let zero = Some(0i64);
        assert_eq!(*require_some(&zero, "Tenant.parentTenantId").unwrap(), 0);
        assert!(require_some::<i64>(&None, "x").is_err());
    }

    #[test]
    fn test_extract_list() {
        let items: Vec<NameValue> = extract_list(
            json!({"size": 2, "preferences": [{"name": "a", "value": "1"}, {"name": "b"}]}),
            "preferences",
            "/v1/x",
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].value, None);

        let empty: Vec<NameValue> = extract_list(json!({"size": 0}), "preferences", "/v1/x").unwrap();
        assert!(empty.is_empty());

        let null: Vec<NameValue> =
            extract_list(json!({"preferences": null}), "preferences", "/v1/x").unwrap();
        assert!(null.is_empty());
    }

    #[test]
    fn test_extract_list_bad_shape() {
        let err = extract_list::<NameValue>(json!({"preferences": "nope"}), "preferences", "/v1/x")
            .unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
    }

    #[test]
    fn test_region_path() {
        assert_eq!(
            region_path("1", "2", "3").unwrap(),
            "/v1/tenants/1/clouds/2/regions/3"
        );
        assert!(region_path("1", "", "3").is_err());
    }

    #[test]
    fn test_seg_encodes() {
        assert_eq!(seg("a b/c"), "a%20b%2Fc");
        assert_eq!(seg("42"), "42");
    }
}
