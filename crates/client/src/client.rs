use async_trait::async_trait;
use browser_use_core::config::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
use browser_use_core::{
    ApiResult, Error, Operation, PresignedUrlRequest, Result, TaskPayload,
};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::TaskApi;

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

const JSON_MIME: &str = "application/json";

/// Full request URL for an operation.
///
/// Task ids are appended to the base without a separator, matching the paths
/// the service has always been called with: `{base}/stop-task{id}`,
/// `{base}{id}/status`. Callers that need a slash pass it in the id.
pub fn endpoint(base_url: &str, operation: Operation, task_id: &str) -> String {
    match operation {
        Operation::RunTask => format!("{}/run-task", base_url),
        Operation::StopTask => format!("{}/stop-task{}", base_url, task_id),
        Operation::PauseTask => format!("{}/pause-task{}", base_url, task_id),
        Operation::ResumeTask => format!("{}/resume-task{}", base_url, task_id),
        Operation::GetTaskStatus => format!("{}{}/status", base_url, task_id),
        Operation::GetTask => format!("{}{}", base_url, task_id),
        Operation::GetTaskMedia => format!("{}{}/media", base_url, task_id),
        Operation::UploadPresignedUrl => format!("{}/uploads/presigned-url", base_url),
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Client for the Browser Use cloud task API.
#[derive(Clone)]
pub struct BrowserUseClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for BrowserUseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserUseClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl BrowserUseClient {
    /// The key is sent exactly as given; empty or whitespace-only keys are rejected.
    pub fn new(api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Validation("api key must not be empty".to_string()));
        }
        HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
            Error::Validation(format!("api key is not a valid header value: {}", e))
        })?;

        let client = Client::builder()
            .user_agent(format!("browser-use-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = DEFAULT_API_BASE.to_string();
        info!(base_url = %base_url, timeout_secs = DEFAULT_TIMEOUT_SECS, "Created BrowserUseClient");

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Replace the base URL for subsequent calls. Trailing slashes are dropped.
    pub fn set_base_url(&mut self, url: &str) -> &mut Self {
        self.base_url = normalize_base_url(url);
        debug!(base_url = %self.base_url, "Base URL updated");
        self
    }

    /// Replace the per-request timeout for subsequent calls. Zero is raised to one second.
    pub fn set_timeout(&mut self, seconds: u64) -> &mut Self {
        let seconds = if seconds == 0 {
            warn!("Timeout of 0s is not allowed, using 1s");
            1
        } else {
            seconds
        };
        self.timeout = Duration::from_secs(seconds);
        debug!(timeout_secs = seconds, "Timeout updated");
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.set_base_url(url);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.set_timeout(seconds);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, JSON_MIME)
            .header(ACCEPT, JSON_MIME)
            .timeout(self.timeout)
    }

    async fn call(
        &self,
        operation: Operation,
        method: Method,
        task_id: &str,
        body: Option<&Value>,
    ) -> Result<ApiResult> {
        let url = endpoint(&self.base_url, operation, task_id);
        info!(operation = operation.name(), method = %method, url = %url, "Calling Browser Use API");

        let mut request = self.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(operation, e))?;

        handle_response(operation, response).await
    }
}

/// Map a response onto the uniform result shape.
async fn handle_response(operation: Operation, response: Response) -> Result<ApiResult> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::transport(operation, e))?;

    if status.is_success() {
        debug!(operation = operation.name(), status = status.as_u16(), body_len = body.len(), "Browser Use API response");
        return Ok(parse_success_body(operation, &body));
    }

    let message = extract_error_message(&body);
    error!(operation = operation.name(), status = status.as_u16(), body = %body, "Browser Use API error");
    Err(Error::api(operation, status.as_u16(), message))
}

/// Anything other than a JSON object (empty, `null`, lists, non-JSON) yields an empty map.
fn parse_success_body(operation: Operation, body: &str) -> ApiResult {
    if body.trim().is_empty() {
        return ApiResult::new();
    }
    match serde_json::from_str::<Option<ApiResult>>(body) {
        Ok(map) => map.unwrap_or_default(),
        Err(e) => {
            warn!(
                operation = operation.name(),
                error = %e,
                body_len = body.len(),
                "Success body is not a JSON object, returning empty result"
            );
            ApiResult::new()
        }
    }
}

/// `message`, then `error`, then a fixed fallback. Undecodable bodies count as empty.
fn extract_error_message(body: &str) -> String {
    let data: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    ["message", "error"]
        .iter()
        .find_map(|key| match data.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        })
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())
}

#[async_trait]
impl TaskApi for BrowserUseClient {
    async fn run_task(&self, payload: &TaskPayload) -> Result<ApiResult> {
        let body = Value::Object(payload.clone());
        self.call(Operation::RunTask, Method::POST, "", Some(&body)).await
    }

    async fn stop_task(&self, task_id: &str) -> Result<ApiResult> {
        self.call(Operation::StopTask, Method::PUT, task_id, None).await
    }

    async fn pause_task(&self, task_id: &str) -> Result<ApiResult> {
        self.call(Operation::PauseTask, Method::PUT, task_id, None).await
    }

    async fn resume_task(&self, task_id: &str) -> Result<ApiResult> {
        self.call(Operation::ResumeTask, Method::PUT, task_id, None).await
    }

    async fn get_task_status(&self, task_id: &str) -> Result<ApiResult> {
        self.call(Operation::GetTaskStatus, Method::GET, task_id, None).await
    }

    async fn get_task(&self, task_id: &str) -> Result<ApiResult> {
        self.call(Operation::GetTask, Method::GET, task_id, None).await
    }

    async fn get_task_media(&self, task_id: &str) -> Result<ApiResult> {
        self.call(Operation::GetTaskMedia, Method::GET, task_id, None).await
    }

    async fn upload_presigned_url(&self, file_name: &str, content_type: &str) -> Result<ApiResult> {
        let body = serde_json::to_value(PresignedUrlRequest::new(file_name, content_type))?;
        self.call(Operation::UploadPresignedUrl, Method::POST, "", Some(&body))
            .await
    }
}
