//! Error types and API response structures

use super::codes::ErrorCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type across the platform:
/// - standardized numeric codes via [`ErrorCode`]
/// - human-readable messages
/// - optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> http::StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a permission denied error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create an invalid request error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Invalid status transition error (forward-only lifecycle violations)
    pub fn invalid_transition(from: impl std::fmt::Display, to: impl std::fmt::Display) -> Self {
        Self::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Invalid status transition: {from} -> {to}"),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::error!(code = %self.code, "{}", self.message);
        }
        let mut body = ApiResponse::<()>::error(self.code, self.message);
        body.details = self.details;
        (status, Json(body)).into_response()
    }
}

#[cfg(feature = "db")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::new(ErrorCode::NotFound),
            other => AppError::database(other.to_string()),
        }
    }
}

/// Application-level Result type, used in HTTP handlers and services
pub type AppResult<T> = Result<T, AppError>;

/// Unified API response format
///
/// Success responses carry their payload directly; this envelope is used for
/// error bodies and for endpoints that return a bare acknowledgement.
///
/// ```json
/// {
///   "code": 4102,
///   "message": "Invalid status transition: PAID -> CREATED"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Numeric error code (0 means success)
    pub code: u16,
    /// Human-readable message
    pub message: String,
    /// Response data (omitted on errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Structured error details (omitted when empty)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            code: ErrorCode::Success.code(),
            message: "success".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// 创建错误响应
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(42);
        assert_eq!(resp.code, 0);
        assert_eq!(resp.data, Some(42));
    }

    #[test]
    fn test_error_envelope_skips_data() {
        let resp = ApiResponse::<()>::error(ErrorCode::OrderNotFound, "Order 7 not found");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"code":4001,"message":"Order 7 not found"}"#);
    }

    #[test]
    fn test_invalid_transition_error() {
        let err = AppError::invalid_transition("PAID", "CREATED");
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        assert_eq!(err.message, "Invalid status transition: PAID -> CREATED");
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_not_found_carries_resource_detail() {
        let err = AppError::not_found("Order 12");
        assert_eq!(err.message, "Order 12 not found");
        let details = err.details.unwrap();
        assert_eq!(details["resource"], serde_json::json!("Order 12"));
    }
}
