//! The API response envelope: `{success, message, data}`, plus `total` on
//! list endpoints.

use serde::{Deserialize, Serialize};

/// Successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            total: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            total: None,
        }
    }

    /// Envelope without a body, for operations that only acknowledge.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            total: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// List envelope; `total` mirrors the returned page length.
    pub fn list(data: Vec<T>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            total: Some(data.len()),
            data: Some(data),
        }
    }
}

/// Failure body sharing the same envelope shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    /// Field-level details for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Some(errors),
        }
    }
}
