use thiserror::Error;

// Failure of a single backend call, as seen by views.
// Transport details are flattened to strings so fakes can build them without reqwest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("transport error: {message}")]
    Transport { message: String, timeout: bool },

    #[error("{}", status_line(*status, detail.as_deref()))]
    Status { status: u16, detail: Option<String> },

    // 2xx response whose body still reports a failure (e.g. `{"error": "..."}`).
    #[error("rejected by backend: {0}")]
    Rejected(String),

    #[error("response decode error: {0}")]
    Decode(String),

    // Caught before any request is issued.
    #[error("{0}")]
    Validation(String),

    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn status(status: u16, detail: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            detail: Some(detail.into()),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
            timeout: false,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }

    // Backend-provided explanation, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            ApiError::Rejected(detail) => Some(detail),
            _ => None,
        }
    }
}

fn status_line(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("upstream error {status}: {detail}"),
        None => format!("upstream error {status}"),
    }
}

// Durable session storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session storage format error: {0}")]
    Format(#[from] serde_json::Error),
}
