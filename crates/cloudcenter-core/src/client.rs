//! HTTP transport for the CloudCenter management API
//!
//! Every request carries `Content-Type: application/json` and HTTP basic
//! credentials (username + API key). Only 200, 201, 202 and 204 count as
//! success; any other status becomes [`CoreError::Api`] with the raw body as
//! its message. There are no retries at this layer.

use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::{CoreError, Result};

/// Default user agent for library requests
pub const DEFAULT_USER_AGENT: &str = concat!("cloudcenter-core/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Form field name used by the app import endpoint
const UPLOAD_FIELD: &str = "file";

/// Returns true for the status codes the remote API uses to signal success
pub fn is_success(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201 | 202 | 204)
}

/// Authenticated client for one CloudCenter manager
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Clone)]
pub struct CloudCenterClient {
    http: ReqwestClient,
    base_url: String,
    username: String,
    api_key: String,
}

impl fmt::Debug for CloudCenterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudCenterClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl CloudCenterClient {
    /// Start building a new client.
    pub fn builder() -> CloudCenterClientBuilder {
        CloudCenterClientBuilder::default()
    }

    /// Client with default settings (certificate validation on, 30s timeout).
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        Self::builder()
            .base_url(base_url)
            .username(username)
            .api_key(api_key)
            .build()
    }

    /// Base URL of the manager, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Username used for basic auth
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Resolve a path against the base URL.
    ///
    /// Absolute `http(s)://` URLs are used as-is, so status URLs handed back
    /// by the remote side can be fetched directly.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Url::parse(&raw).map_err(|e| CoreError::Validation(format!("invalid URL '{}': {}", raw, e)))
    }

    /// Issue one request and return the raw response body.
    pub async fn execute(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let url = self.resolve(path)?;
        self.execute_url(method, url, body).await
    }

    async fn execute_url(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            trace!(bytes = body.len(), "attaching request body");
            request = request.body(body);
        }
        self.send(method, url, request).await
    }

    async fn send(&self, method: Method, url: Url, request: RequestBuilder) -> Result<Vec<u8>> {
        debug!(%method, %url, "sending CloudCenter request");

        let response = request
            .basic_auth(&self.username, Some(&self.api_key))
            .send()
            .await
            .inspect_err(|e| debug!(%method, %url, error = %e, "CloudCenter request failed"))?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(%method, %url, %status, bytes = bytes.len(), "received CloudCenter response");

        if !is_success(status) {
            return Err(CoreError::Api {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }

    /// GET and decode a JSON response
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self.execute(Method::GET, path, None).await?;
        decode(&bytes, path)
    }

    /// GET with query parameters appended to the path
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let mut url = self.resolve(path)?;
        url.query_pairs_mut().extend_pairs(query.iter().copied());
        let bytes = self.execute_url(Method::GET, url, None).await?;
        decode(&bytes, path)
    }

    /// POST a JSON body and decode the response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let bytes = self.execute(Method::POST, path, Some(body)).await?;
        decode(&bytes, path)
    }

    /// POST without a body and decode the response
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self.execute(Method::POST, path, None).await?;
        decode(&bytes, path)
    }

    /// POST a JSON body, ignoring whatever the server answers
    pub async fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let body = encode(body)?;
        self.execute(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    /// PUT a JSON body and decode the response
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let bytes = self.execute(Method::PUT, path, Some(body)).await?;
        decode(&bytes, path)
    }

    /// DELETE, discarding the response body
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// DELETE and decode the response body, or `None` if the body is empty
    pub async fn delete_with_response<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let bytes = self.execute(Method::DELETE, path, None).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        decode(&bytes, path).map(Some)
    }

    /// Raw GET returning untyped JSON
    pub async fn get_raw(&self, path: &str) -> Result<Value> {
        let bytes = self.execute(Method::GET, path, None).await?;
        Ok(raw_value(&bytes))
    }

    /// Raw POST with an untyped JSON body
    pub async fn post_raw(&self, path: &str, body: Value) -> Result<Value> {
        let bytes = self.execute(Method::POST, path, Some(encode(&body)?)).await?;
        Ok(raw_value(&bytes))
    }

    /// Raw PUT with an untyped JSON body
    pub async fn put_raw(&self, path: &str, body: Value) -> Result<Value> {
        let bytes = self.execute(Method::PUT, path, Some(encode(&body)?)).await?;
        Ok(raw_value(&bytes))
    }

    /// Raw DELETE returning untyped JSON (`null` for an empty body)
    pub async fn delete_raw(&self, path: &str) -> Result<Value> {
        let bytes = self.execute(Method::DELETE, path, None).await?;
        Ok(raw_value(&bytes))
    }

    /// Multipart upload of a single file
    ///
    /// Used for the app import endpoint (`/v1/apps/portation`). The content
    /// type is the multipart boundary, not JSON.
    pub async fn upload(&self, path: &str, file_name: &str, contents: Vec<u8>) -> Result<Value> {
        let url = self.resolve(path)?;
        let part = reqwest::multipart::Part::bytes(contents).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD, part);
        let request = self.http.post(url.clone()).multipart(form);
        let bytes = self.send(Method::POST, url, request).await?;
        Ok(raw_value(&bytes))
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(CoreError::Encode)
}

fn decode<T: DeserializeOwned>(bytes: &[u8], context: &str) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| CoreError::Decode {
        context: context.to_string(),
        source,
    })
}

fn raw_value(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Builder for [`CloudCenterClient`].
#[derive(Debug)]
pub struct CloudCenterClientBuilder {
    base_url: Option<String>,
    username: Option<String>,
    api_key: Option<String>,
    insecure: bool,
    timeout: Duration,
    user_agent: String,
}

impl Default for CloudCenterClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            api_key: None,
            insecure: false,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CloudCenterClientBuilder {
    /// Manager URL, e.g. `https://ccm.example.com`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Skip TLS certificate validation.
    ///
    /// Off by default. Only for managers with self-signed certificates.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<CloudCenterClient> {
        let base_url = self
            .base_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| CoreError::Validation("base URL is missing".to_string()))?;
        let username = self
            .username
            .filter(|u| !u.is_empty())
            .ok_or_else(|| CoreError::Validation("username is missing".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| CoreError::Validation("API key is missing".to_string()))?;

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| CoreError::Validation(format!("invalid base URL '{}': {}", base_url, e)))?;

        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent);

        if self.insecure {
            warn!(%base_url, "TLS certificate validation disabled for this client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build()?;

        Ok(CloudCenterClient {
            http,
            base_url,
            username,
            api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CloudCenterClient {
        CloudCenterClient::new("https://ccm.example.com/", "cliqradmin", "key").unwrap()
    }

    #[test]
    fn test_success_set_is_exact() {
        for code in [200u16, 201, 202, 204] {
            assert!(is_success(StatusCode::from_u16(code).unwrap()), "{code}");
        }
        for code in [203u16, 206, 301, 304, 400, 404, 500] {
            assert!(!is_success(StatusCode::from_u16(code).unwrap()), "{code}");
        }
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let client = client();
        assert_eq!(client.base_url(), "https://ccm.example.com");
        assert_eq!(
            client.resolve("/v2/jobs/12").unwrap().as_str(),
            "https://ccm.example.com/v2/jobs/12"
        );
        assert_eq!(
            client.resolve("v1/tenants").unwrap().as_str(),
            "https://ccm.example.com/v1/tenants"
        );
        assert_eq!(
            client
                .resolve("https://other.example.com/v1/operationStatus/9")
                .unwrap()
                .as_str(),
            "https://other.example.com/v1/operationStatus/9"
        );
    }

    #[test]
    fn test_builder_requires_credentials() {
        let err = CloudCenterClient::builder()
            .base_url("https://ccm.example.com")
            .api_key("key")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("username"));

        let err = CloudCenterClient::builder()
            .username("admin")
            .api_key("key")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("base URL"));

        let err = CloudCenterClient::new("not a url", "admin", "key").unwrap_err();
        assert!(err.is_bad_request());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let rendered = format!("{:?}", client());
        assert!(rendered.contains("cliqradmin"));
        assert!(!rendered.contains("key\""));
    }

    #[test]
    fn test_raw_value_handles_empty_and_text() {
        assert_eq!(raw_value(b""), Value::Null);
        assert_eq!(raw_value(b"  \n"), Value::Null);
        assert_eq!(raw_value(br#"{"a":1}"#), serde_json::json!({"a": 1}));
        assert_eq!(raw_value(b"plain"), Value::String("plain".to_string()));
    }
}
