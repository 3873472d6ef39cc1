//! Helpers shared by the resource commands

use std::fs;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CcctlError, Result as CliResult};
use crate::output::{OutputFormat, print_output};

/// Read input that may be a literal or an `@file` reference
pub fn read_file_input(input: &str) -> CliResult<String> {
    if let Some(filename) = input.strip_prefix('@') {
        fs::read_to_string(filename)
            .with_context(|| format!("Failed to read file: {}", filename))
            .map_err(|e| CcctlError::FileError {
                path: filename.to_string(),
                message: format!("{:#}", e),
            })
    } else {
        Ok(input.to_string())
    }
}

/// Parse `--data` (JSON string or `@file`) as a JSON value
pub fn read_json_input(input: &str) -> CliResult<Value> {
    let content = read_file_input(input)?;
    serde_json::from_str(&content).map_err(|e| CcctlError::InvalidInput {
        message: format!("Invalid JSON in --data: {}", e),
    })
}

/// Parse `--data` into a typed record
pub fn read_record<T: DeserializeOwned>(input: &str) -> CliResult<T> {
    let value = read_json_input(input)?;
    serde_json::from_value(value).map_err(|e| CcctlError::InvalidInput {
        message: format!("--data does not match the expected record: {}", e),
    })
}

/// Print a result with the selected format and query
pub fn emit<T: Serialize>(data: T, format: OutputFormat, query: Option<&str>) -> CliResult<()> {
    print_output(data, format, query).map_err(|e| CcctlError::OutputError {
        message: format!("{:#}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudcenter_core::Tenant;
    use std::io::Write;

    #[test]
    fn test_read_literal_and_file() {
        assert_eq!(read_file_input("{}").unwrap(), "{}");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name":"acme"}}"#).unwrap();
        let arg = format!("@{}", file.path().display());
        assert_eq!(read_json_input(&arg).unwrap()["name"], "acme");
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let err = read_file_input("@/nonexistent/ccctl/input.json").unwrap_err();
        assert!(matches!(err, CcctlError::FileError { .. }));
    }

    #[test]
    fn test_read_record_uses_wire_names() {
        let tenant: Tenant =
            read_record(r#"{"name":"acme","shortName":"ac","userId":"2"}"#).unwrap();
        assert_eq!(tenant.short_name.as_deref(), Some("ac"));
    }

    #[test]
    fn test_invalid_json_is_invalid_input() {
        assert!(matches!(
            read_json_input("{not json"),
            Err(CcctlError::InvalidInput { .. })
        ));
    }
}
