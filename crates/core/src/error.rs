use thiserror::Error;

use crate::types::Operation;

/// Boxed transport cause, kept as the `source()` of [`Error::Transport`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    /// The service answered with a non-2xx status.
    #[error("{operation}: API request failed with status {status}: {message}")]
    Api {
        operation: Operation,
        status: u16,
        message: String,
    },

    /// The request never produced a response (connect, DNS, timeout, TLS).
    #[error("{operation}: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: BoxError,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn api(operation: Operation, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            operation,
            status,
            message: message.into(),
        }
    }

    pub fn transport<E>(operation: Operation, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            operation,
            source: Box::new(source),
        }
    }

    /// HTTP status of a remote API error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Operation that produced this error, if it came from a remote call.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::Api { operation, .. } | Error::Transport { operation, .. } => {
                Some(*operation)
            }
            _ => None,
        }
    }

    /// Message extracted from the remote error body.
    #[must_use]
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// True when a transport failure was caused by the request timing out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        let Error::Transport { source, .. } = self else {
            return false;
        };
        let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(source.as_ref());
        while let Some(err) = cause {
            if let Some(io) = err.downcast_ref::<std::io::Error>() {
                if io.kind() == std::io::ErrorKind::TimedOut {
                    return true;
                }
            }
            if err.to_string().contains("timed out") {
                return true;
            }
            cause = err.source();
        }
        false
    }
}

pub type Result<T> = std::result::Result<T, Error>;
