//! Client for the Browser Use cloud task API.

pub mod client;
pub mod factory;

use async_trait::async_trait;
use browser_use_core::{ApiResult, Result, TaskPayload};

/// The remote task operations. Each call issues exactly one HTTP request.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn run_task(&self, payload: &TaskPayload) -> Result<ApiResult>;
    async fn stop_task(&self, task_id: &str) -> Result<ApiResult>;
    async fn pause_task(&self, task_id: &str) -> Result<ApiResult>;
    async fn resume_task(&self, task_id: &str) -> Result<ApiResult>;
    async fn get_task_status(&self, task_id: &str) -> Result<ApiResult>;
    async fn get_task(&self, task_id: &str) -> Result<ApiResult>;
    async fn get_task_media(&self, task_id: &str) -> Result<ApiResult>;
    async fn upload_presigned_url(&self, file_name: &str, content_type: &str) -> Result<ApiResult>;
}

pub use client::{endpoint, BrowserUseClient, UNKNOWN_ERROR_MESSAGE};
pub use factory::{create_client, create_task_api};
