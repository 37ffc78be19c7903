use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::error::Result;

/// Free-form run-task body. Shape is validated by the remote service.
pub type TaskPayload = Map<String, Value>;

/// Decoded success body.
pub type ApiResult = Map<String, Value>;

/// The remote operations exposed by the task API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RunTask,
    StopTask,
    PauseTask,
    ResumeTask,
    GetTaskStatus,
    GetTask,
    GetTaskMedia,
    UploadPresignedUrl,
}

impl Operation {
    /// Short machine name, used as a tracing field.
    pub fn name(self) -> &'static str {
        match self {
            Operation::RunTask => "run_task",
            Operation::StopTask => "stop_task",
            Operation::PauseTask => "pause_task",
            Operation::ResumeTask => "resume_task",
            Operation::GetTaskStatus => "get_task_status",
            Operation::GetTask => "get_task",
            Operation::GetTaskMedia => "get_task_media",
            Operation::UploadPresignedUrl => "upload_presigned_url",
        }
    }

    /// Prefix for errors raised while performing this operation.
    pub fn failure_label(self) -> &'static str {
        match self {
            Operation::RunTask => "Failed to run task",
            Operation::StopTask => "Failed to stop task",
            Operation::PauseTask => "Failed to pause task",
            Operation::ResumeTask => "Failed to resume task",
            Operation::GetTaskStatus => "Failed to get task status",
            Operation::GetTask => "Failed to get task",
            Operation::GetTaskMedia => "Failed to get task media",
            Operation::UploadPresignedUrl => "Failed to get upload presigned URL",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_label())
    }
}

/// Typed builder for the documented run-task options.
///
/// Unset options are left out of the serialized payload so the service
/// applies its own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunTaskRequest {
    /// Instructions for the agent.
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_domains: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_browser_data: Option<bool>,
    /// JSON schema string the agent uses as its output model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_output_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_adblock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_proxy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_elements: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_file_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_viewport_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_viewport_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_agent_steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_public_share: Option<bool>,
}

impl RunTaskRequest {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            ..Default::default()
        }
    }

    pub fn secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_domains = Some(domains.into_iter().map(Into::into).collect());
        self
    }

    pub fn llm_model(mut self, model: impl Into<String>) -> Self {
        self.llm_model = Some(model.into());
        self
    }

    pub fn structured_output_json(mut self, schema: impl Into<String>) -> Self {
        self.structured_output_json = Some(schema.into());
        self
    }

    pub fn proxy(mut self, country_code: Option<&str>) -> Self {
        self.use_proxy = Some(true);
        self.proxy_country_code = country_code.map(str::to_string);
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.browser_viewport_width = Some(width);
        self.browser_viewport_height = Some(height);
        self
    }

    pub fn max_agent_steps(mut self, steps: u32) -> Self {
        self.max_agent_steps = Some(steps);
        self
    }

    pub fn included_file_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_file_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn public_share(mut self, enabled: bool) -> Self {
        self.enable_public_share = Some(enabled);
        self
    }

    pub fn into_payload(self) -> Result<TaskPayload> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            // derived Serialize on a struct always yields an object
            _ => Ok(Map::new()),
        }
    }
}

/// Body of the presigned upload URL request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresignedUrlRequest {
    pub file_name: String,
    pub content_type: String,
}

impl PresignedUrlRequest {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
        }
    }
}
