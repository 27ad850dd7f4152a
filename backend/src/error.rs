//! Error handling for the Fruit Quality Analysis service
//!
//! Every failure is reported as `{"detail": ..., "code": ...}` without
//! exposing internal error sources.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ValidationError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("File must be an image, got {content_type:?}")]
    NotAnImage { content_type: Option<String> },

    #[error("Field required: {0}")]
    MissingField(String),

    #[error("Unprocessable request body: {0}")]
    UnprocessableBody(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Server-side errors
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// HTTP status and stable error code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotAnImage { .. } => (StatusCode::BAD_REQUEST, "NOT_AN_IMAGE"),
            AppError::MissingField(_) => (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_FIELD"),
            AppError::UnprocessableBody(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE_BODY"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            AppError::ImageProcessing(_) => (StatusCode::BAD_REQUEST, "IMAGE_PROCESSING_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::StorageError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::NotAnImage { .. } => "File must be an image".to_string(),
            AppError::MissingField(field) => format!("Field required: {}", field),
            AppError::UnprocessableBody(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::ImageProcessing(msg) => format!("Error processing image: {}", msg),
            AppError::NotFound(resource) => format!("{} not found", resource),
            AppError::StorageError(_) => "Failed to store the uploaded file".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    fn field(&self) -> Option<String> {
        match self {
            AppError::Validation(err) => Some(err.field().to_string()),
            AppError::MissingField(field) => Some(field.clone()),
            AppError::NotAnImage { .. } => Some("file".to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        let body = ErrorResponse {
            detail: self.detail(),
            code: code.to_string(),
            field: self.field(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
