use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

/// Message returned to the caller for any store or internal failure.
/// The underlying error is only written to the server log.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug)]
pub enum AppError {
    /// Email is already registered
    Conflict(String),
    /// No user for the given email or id
    NotFound(String),
    /// Password does not match the stored hash
    AuthMismatch(String),
    InvalidRequest(String),
    DatabaseError(String),
    Internal(String),
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl AppError {
    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        match self {
            AppError::Conflict(msg)
            | AppError::NotFound(msg)
            | AppError::AuthMismatch(msg)
            | AppError::InvalidRequest(msg) => msg.clone(),
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::AuthMismatch(msg) => write!(f, "Authentication failed: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl ResponseError for AppError {
    // Conflict keeps the 404 existing clients already handle; both lookup
    // failures share 401.
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Conflict(_) => StatusCode::NOT_FOUND,
            AppError::NotFound(_) | AppError::AuthMismatch(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message: self.public_message(),
        })
    }
}
