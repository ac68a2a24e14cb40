// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug)]
pub enum KopilkaError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,

    #[error("Account is banned: {0}")]
    Banned(String),

    #[error("Requested amount exceeds trust level limit of {0}")]
    TrustLimitExceeded(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Internal server error")]
    InternalError,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Convert KopilkaError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for KopilkaError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code) = match self {
            KopilkaError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            KopilkaError::AlreadyExists(_) => (StatusCode::CONFLICT, "ALREADY_EXISTS"),
            KopilkaError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            KopilkaError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            KopilkaError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            KopilkaError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            KopilkaError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            KopilkaError::Banned(_) => (StatusCode::FORBIDDEN, "BANNED"),
            KopilkaError::TrustLimitExceeded(_) => (StatusCode::FORBIDDEN, "TRUST_LIMIT_EXCEEDED"),
            KopilkaError::InvalidTransition(_) => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
            KopilkaError::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            KopilkaError::RateLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED")
            }
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            KopilkaError::NotFound(_) => StatusCode::NOT_FOUND,
            KopilkaError::AlreadyExists(_) => StatusCode::CONFLICT,
            KopilkaError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            KopilkaError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            KopilkaError::ValidationError(_) => StatusCode::BAD_REQUEST,
            KopilkaError::Unauthorized => StatusCode::UNAUTHORIZED,
            KopilkaError::Forbidden => StatusCode::FORBIDDEN,
            KopilkaError::Banned(_) => StatusCode::FORBIDDEN,
            KopilkaError::TrustLimitExceeded(_) => StatusCode::FORBIDDEN,
            KopilkaError::InvalidTransition(_) => StatusCode::CONFLICT,
            KopilkaError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            KopilkaError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}
