//! Raw API access commands for direct REST endpoint calls

use serde_json::{Value, json};
use tracing::debug;

use super::CommandContext;
use super::utils::read_json_input;
use crate::cli::HttpMethod;
use crate::error::Result as CliResult;
use crate::output::OutputFormat;

/// Handle raw API commands
///
/// The path is resolved against the profile's base URL. Responses are
/// printed as JSON unless another format was asked for explicitly.
pub async fn handle_api_command(
    ctx: &CommandContext<'_>,
    method: HttpMethod,
    path: &str,
    data: Option<&str>,
) -> CliResult<()> {
    let client = ctx.client()?;

    let normalized_path = normalize_path(path);
    let body: Option<Value> = data.map(read_json_input).transpose()?;
    debug!("{} {}", method, normalized_path);

    let response = match method {
        HttpMethod::Get => client.get_raw(&normalized_path).await?,
        HttpMethod::Post => client.post_raw(&normalized_path, body.unwrap_or(json!({}))).await?,
        HttpMethod::Put => client.put_raw(&normalized_path, body.unwrap_or(json!({}))).await?,
        HttpMethod::Delete => client.delete_raw(&normalized_path).await?,
    };

    // Tables rarely fit arbitrary payloads; only use one when requested.
    let format = match ctx.format {
        OutputFormat::Table if !matches!(response, Value::Array(_) | Value::Object(_)) => {
            OutputFormat::Json
        }
        other => other,
    };
    super::utils::emit(response, format, ctx.query)
}

/// Ensure path starts with / unless it is an absolute URL
fn normalize_path(path: &str) -> String {
    if path.starts_with('/') || path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
