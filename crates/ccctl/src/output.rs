//! Output rendering: JSON, YAML or tables, with optional JMESPath filtering

use std::io::IsTerminal;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use comfy_table::Table;
use jpx_core::Runtime;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::cli;

/// Global JMESPath runtime with extended functions
static JMESPATH_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the JMESPath runtime with extended functions
pub fn get_jmespath_runtime() -> &'static Runtime {
    JMESPATH_RUNTIME.get_or_init(|| Runtime::builder().with_all_extensions().build())
}

/// Quote bare backtick literals so `` `foo` `` compiles as `` `"foo"` ``.
///
/// Literals that are already valid JSON (numbers, booleans, quoted strings,
/// arrays, objects) are left alone.
fn normalize_backtick_literals(query: &str) -> String {
    static BACKTICK_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = BACKTICK_RE
        .get_or_init(|| Regex::new(r"`([^`\\]*(?:\\.[^`\\]*)*)`").ok())
        .as_ref()
    else {
        return query.to_string();
    };

    re.replace_all(query, |caps: &regex::Captures| {
        let content = &caps[1];
        let trimmed = content.trim();

        if serde_json::from_str::<Value>(trimmed).is_ok() {
            format!("`{}`", content)
        } else {
            let escaped = trimmed.replace('\\', "\\\\").replace('"', "\\\"");
            format!("`\"{}\"`", escaped)
        }
    })
    .into_owned()
}

/// Compile a JMESPath expression using the extended runtime.
pub fn compile_jmespath(
    query: &str,
) -> Result<jpx_core::Expression<'static>, jpx_core::JmespathError> {
    let normalized = normalize_backtick_literals(query);
    get_jmespath_runtime().compile(&normalized)
}

/// Apply a JMESPath query to a JSON value
pub fn apply_jmespath(data: &Value, query: &str) -> Result<Value> {
    let expr = compile_jmespath(query)
        .with_context(|| format!("Invalid JMESPath expression: {}", query))?;
    expr.search(data)
        .with_context(|| format!("Failed to apply JMESPath query: {}", query))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

impl OutputFormat {
    /// Resolve the CLI choice. `auto` means a table on a terminal and JSON
    /// when piped.
    pub fn from_cli(format: cli::OutputFormat) -> Self {
        match format {
            cli::OutputFormat::Json => Self::Json,
            cli::OutputFormat::Yaml => Self::Yaml,
            cli::OutputFormat::Table => Self::Table,
            cli::OutputFormat::Auto => {
                if std::io::stdout().is_terminal() {
                    Self::Table
                } else {
                    Self::Json
                }
            }
        }
    }
}

pub fn print_output<T: Serialize>(
    data: T,
    format: OutputFormat,
    query: Option<&str>,
) -> Result<()> {
    println!("{}", render(data, format, query)?);
    Ok(())
}

/// Render to a string without printing
pub fn render<T: Serialize>(data: T, format: OutputFormat, query: Option<&str>) -> Result<String> {
    let mut json_value = serde_json::to_value(data)?;

    if let Some(query_str) = query {
        json_value = apply_jmespath(&json_value, query_str)?;
    }

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json_value)?,
        OutputFormat::Yaml => serde_yaml::to_string(&json_value)?,
        OutputFormat::Table => render_table(&json_value),
    };
    Ok(rendered)
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(arr) if arr.is_empty() => "No results".to_string(),
        Value::Array(arr) if arr.iter().all(Value::is_object) => {
            // Records omit absent fields, so gather columns from every row.
            let mut headers: Vec<&String> = Vec::new();
            for item in arr {
                if let Value::Object(obj) = item {
                    for key in obj.keys() {
                        if !headers.contains(&key) {
                            headers.push(key);
                        }
                    }
                }
            }

            let mut table = Table::new();
            table.set_header(headers.iter().map(|h| h.as_str()));
            for item in arr {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| format_value(item.get(h.as_str()).unwrap_or(&Value::Null)))
                    .collect();
                table.add_row(row);
            }
            table.to_string()
        }
        Value::Array(arr) => {
            let mut table = Table::new();
            table.set_header(vec!["Value"]);
            for item in arr {
                table.add_row(vec![format_value(item)]);
            }
            table.to_string()
        }
        Value::Object(obj) => {
            let mut table = Table::new();
            table.set_header(vec!["Key", "Value"]);
            for (key, val) in obj {
                table.add_row(vec![key.clone(), format_value(val)]);
            }
            table.to_string()
        }
        _ => format_value(value),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_backtick_unquoted_string() {
        assert_eq!(
            normalize_backtick_literals(r#"[?status==`JobRunning`]"#),
            r#"[?status==`"JobRunning"`]"#
        );
    }

    #[test]
    fn test_normalize_backtick_keeps_json_literals() {
        assert_eq!(
            normalize_backtick_literals(r#"[?name==`"web"`]"#),
            r#"[?name==`"web"`]"#
        );
        assert_eq!(normalize_backtick_literals("[?size==`3`]"), "[?size==`3`]");
        assert_eq!(
            normalize_backtick_literals("[?favorite==`true`]"),
            "[?favorite==`true`]"
        );
    }

    #[test]
    fn test_query_filters_records() {
        let data = json!([
            {"id": "1", "status": "JobRunning"},
            {"id": "2", "status": "JobError"}
        ]);
        let filtered = apply_jmespath(&data, "[?status==`JobError`].id").unwrap();
        assert_eq!(filtered, json!(["2"]));
    }

    #[test]
    fn test_invalid_query_is_an_error() {
        assert!(apply_jmespath(&json!({}), "[?").is_err());
    }

    #[test]
    fn test_table_collects_columns_from_all_rows() {
        let rendered = render(
            json!([{"id": "1"}, {"id": "2", "name": "web"}]),
            OutputFormat::Table,
            None,
        )
        .unwrap();
        assert!(rendered.contains("name"));
        assert!(rendered.contains("web"));
    }

    #[test]
    fn test_empty_list_table() {
        let rendered = render(json!([]), OutputFormat::Table, None).unwrap();
        assert_eq!(rendered, "No results");
    }

    #[test]
    fn test_yaml_output() {
        let rendered = render(json!({"id": "7"}), OutputFormat::Yaml, None).unwrap();
        assert!(rendered.contains("id: '7'"));
    }
}
