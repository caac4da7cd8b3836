use std::fmt;

use crate::domain::ApiError;

// Whether a call was made against a public (login/signup) or protected endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

// Closed set of failure kinds every view reports through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Timeout,
    SessionExpired,
    InvalidCredentials,
    Validation,
    NoFaceDetected,
    ImageQuality,
    ServiceUpdating,
    ServerError,
    Rejected,
    Unexpected,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub category: ErrorCategory,
    pub text: String,
}

impl UserMessage {
    pub fn new(category: ErrorCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }

    pub fn validation(text: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, text)
    }

    pub fn is_session_expired(&self) -> bool {
        self.category == ErrorCategory::SessionExpired
    }
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

pub const NETWORK_TEXT: &str = "Connection issue. Please check your internet and try again.";
pub const TIMEOUT_TEXT: &str = "The request took too long. Please try again.";
pub const SESSION_EXPIRED_TEXT: &str = "Your session has expired. Please log in again.";
pub const INVALID_CREDENTIALS_TEXT: &str = "Invalid credentials";
pub const SERVER_ERROR_TEXT: &str =
    "Our servers are having a moment. Please try again in a few seconds.";
pub const NO_FACE_TEXT: &str =
    "No face detected. Please ensure your face is clearly visible and well-lit.";
pub const IMAGE_QUALITY_TEXT: &str = "Image quality is too low. Please upload a clearer photo.";
pub const SERVICE_UPDATING_TEXT: &str =
    "Our AI is updating. Please try again in a moment or contact support.";
pub const UNEXPECTED_TEXT: &str = "Something unexpected happened. Our team has been notified.";
pub const FALLBACK_TEXT: &str = "Something went wrong. Please try again.";
pub const CANCELLED_TEXT: &str = "Request cancelled.";

// Longer details are still shown; only runaway dumps are hidden.
const MAX_DETAIL_CHARS: usize = 500;
const TECHNICAL_MARKERS: [&str; 3] = ["{", "Error:", "Traceback"];

// Single mapping from a failed call to what the user sees.
pub fn classify(err: &ApiError, access: Access) -> UserMessage {
    use ErrorCategory::*;

    match err {
        ApiError::Cancelled => UserMessage::new(Cancelled, CANCELLED_TEXT),
        ApiError::Validation(text) => UserMessage::validation(text.clone()),
        ApiError::Transport { timeout: true, .. } => UserMessage::new(Timeout, TIMEOUT_TEXT),
        ApiError::Transport { .. } => UserMessage::new(Network, NETWORK_TEXT),
        ApiError::Status { status: 401, .. } => match access {
            // Login rejects bad credentials with 401; that is not an expired session.
            Access::Public => UserMessage::new(InvalidCredentials, INVALID_CREDENTIALS_TEXT),
            Access::Protected => UserMessage::new(SessionExpired, SESSION_EXPIRED_TEXT),
        },
        ApiError::Status { status, detail } => {
            if let Some(message) = detail.as_deref().and_then(from_detail) {
                return message;
            }
            if *status >= 500 {
                return UserMessage::new(ServerError, SERVER_ERROR_TEXT);
            }
            match detail.as_deref() {
                Some(detail) => plain_or_unexpected(detail),
                None => UserMessage::new(Unexpected, FALLBACK_TEXT),
            }
        }
        ApiError::Rejected(detail) => {
            from_detail(detail).unwrap_or_else(|| plain_or_unexpected(detail))
        }
        ApiError::Decode(_) => UserMessage::new(Unexpected, UNEXPECTED_TEXT),
    }
}

// Known backend failure phrases, matched case-insensitively.
fn from_detail(detail: &str) -> Option<UserMessage> {
    use ErrorCategory::*;

    let lower = detail.to_lowercase();
    let found = if lower.contains("no face") || lower.contains("face not found") {
        (NoFaceDetected, NO_FACE_TEXT)
    } else if lower.contains("blur") || lower.contains("quality") {
        (ImageQuality, IMAGE_QUALITY_TEXT)
    } else if lower.contains("sklearn") || lower.contains("module") {
        (ServiceUpdating, SERVICE_UPDATING_TEXT)
    } else if lower.contains("timeout") {
        (Timeout, TIMEOUT_TEXT)
    } else if lower.contains("internal server") {
        (ServerError, SERVER_ERROR_TEXT)
    } else {
        return None;
    };
    Some(UserMessage::new(found.0, found.1))
}

// Plain backend text is shown as is; tracebacks and object dumps are hidden.
fn plain_or_unexpected(detail: &str) -> UserMessage {
    let detail = detail.trim();
    if detail.is_empty() {
        return UserMessage::new(ErrorCategory::Unexpected, FALLBACK_TEXT);
    }
    let technical = TECHNICAL_MARKERS.iter().any(|marker| detail.contains(marker));
    if !technical && detail.chars().count() <= MAX_DETAIL_CHARS {
        UserMessage::new(ErrorCategory::Rejected, detail)
    } else {
        UserMessage::new(ErrorCategory::Unexpected, UNEXPECTED_TEXT)
    }
}
