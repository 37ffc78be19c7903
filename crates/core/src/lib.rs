pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use paths::Paths;
pub use types::{ApiResult, Operation, PresignedUrlRequest, RunTaskRequest, TaskPayload};
