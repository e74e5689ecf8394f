//! API error handling.
//!
//! Service errors are turned into a JSON body of the form
//! `{ "error": { "code": "...", "message": "...", "details": {...} } }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::auth::SessionError;
use crate::BbsError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed request (400).
    BadRequest,
    /// Login required or credentials rejected (401).
    Unauthorized,
    /// Supplied post password did not match (403).
    PasswordMismatch,
    /// Not found (404).
    NotFound,
    /// Conflict (409).
    Conflict,
    /// Upload exceeds the configured size (413).
    PayloadTooLarge,
    /// Field-level validation failure (422).
    ValidationError,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::PasswordMismatch => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: ErrorCode,
    /// Human-readable message shown to the user.
    pub message: String,
    /// Field-level validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Vec<String>>>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn password_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PasswordMismatch, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PayloadTooLarge, message)
    }

    /// Validation error without field details.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create a validation error from validator::ValidationErrors.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut details: HashMap<String, Vec<String>> = HashMap::new();

        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect();
            details.insert(field.to_string(), messages);
        }

        Self {
            code: ErrorCode::ValidationError,
            message: "Validation failed".to_string(),
            details: Some(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<BbsError> for ApiError {
    fn from(err: BbsError) -> Self {
        match err {
            BbsError::Auth(msg) => ApiError::unauthorized(msg),
            BbsError::BadPassword(msg) => ApiError::password_mismatch(msg),
            BbsError::NotFound(what) => ApiError::not_found(format!("{what} not found")),
            BbsError::Validation(msg) => ApiError::invalid(msg),
            BbsError::Conflict(msg) => ApiError::conflict(msg),
            err => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::from_validation_errors(errors)
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::SessionExpired => ApiError::unauthorized("Session expired, please log in again"),
            SessionError::SessionNotFound => ApiError::unauthorized("Login required"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::PasswordMismatch.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ErrorCode::ValidationError.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_bbs_error() {
        let err: ApiError = BbsError::BadPassword("no match".to_string()).into();
        assert_eq!(err.code(), ErrorCode::PasswordMismatch);
        assert_eq!(err.message(), "no match");

        let err: ApiError = BbsError::NotFound("post".to_string()).into();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "post not found");

        let err: ApiError = BbsError::Conflict("dup".to_string()).into();
        assert_eq!(err.code(), ErrorCode::Conflict);

        let err: ApiError = BbsError::Validation("bad".to_string()).into();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let err: ApiError = BbsError::Database("disk I/O error".to_string()).into();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(!err.message().contains("disk"));
    }

    #[test]
    fn test_from_validation_errors_keeps_fields() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("pass", validator::ValidationError::new("length"));

        let err: ApiError = errors.into();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        let details = err.details.unwrap();
        assert_eq!(details["pass"], vec!["Invalid value for pass".to_string()]);
    }

    #[test]
    fn test_from_session_error() {
        let err: ApiError = SessionError::SessionNotFound.into();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        let err: ApiError = SessionError::SessionExpired.into();
        assert!(err.message().contains("expired"));
    }

    #[test]
    fn test_error_body_serialization() {
        let body = ErrorBody {
            error: ErrorDetail {
                code: ErrorCode::PasswordMismatch,
                message: "wrong".to_string(),
                details: None,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"]["code"], "PASSWORD_MISMATCH");
        assert!(json["error"].get("details").is_none());
    }
}
