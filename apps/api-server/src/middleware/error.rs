//! Error handling - converts domain failures into envelope-shaped JSON.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use postline_shared::ErrorBody;
use std::fmt;

/// Application-level error type behind every handler.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Conflict(String),
    BadGateway(String),
    Internal(String),
    Validation(Vec<String>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound(detail) => ErrorBody::new(detail.clone()),
            AppError::BadRequest(detail) => ErrorBody::new(detail.clone()),
            AppError::Unauthorized => ErrorBody::new("Unauthorized: User ID not found"),
            AppError::Conflict(detail) => ErrorBody::new(detail.clone()),
            AppError::BadGateway(detail) => ErrorBody::new(detail.clone()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorBody::new("Internal server error")
            }
            AppError::Validation(errors) => {
                ErrorBody::with_errors("Validation error", errors.clone())
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

// Conversion from domain errors
impl From<postline_core::error::DomainError> for AppError {
    fn from(err: postline_core::error::DomainError) -> Self {
        use postline_core::error::DomainError;
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Generation(msg) => AppError::BadGateway(msg),
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: invalid value"),
                })
            })
            .collect();
        AppError::Validation(details)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
