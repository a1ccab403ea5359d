//! Error types

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type across the workspace, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
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

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create an order not found error
    pub fn order_not_found(order_id: impl Into<String>) -> Self {
        let id = order_id.into();
        Self::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
            .with_detail("order_id", id)
    }

    /// Create a restaurant not found error
    pub fn restaurant_not_found(restaurant_id: impl Into<String>) -> Self {
        let id = restaurant_id.into();
        Self::with_message(
            ErrorCode::RestaurantNotFound,
            format!("Restaurant {} not found", id),
        )
        .with_detail("restaurant_id", id)
    }

    /// Create a delivery partner not found error
    pub fn partner_not_found(partner_id: impl Into<String>) -> Self {
        let id = partner_id.into();
        Self::with_message(
            ErrorCode::PartnerNotFound,
            format!("Delivery partner {} not found", id),
        )
        .with_detail("partner_id", id)
    }

    /// Create an invalid store path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        let p = path.into();
        Self::with_message(ErrorCode::InvalidStorePath, format!("Invalid store path '{}'", p))
            .with_detail("path", p)
    }

    /// Create a record decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::RecordDecodeFailed, msg)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_message(ErrorCode::IoError, err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("bad input")
            .with_detail("field", "taxRate")
            .with_detail("value", 12.5);
        let details = err.details.unwrap();
        assert_eq!(details.get("field"), Some(&Value::from("taxRate")));
        assert_eq!(details.get("value"), Some(&Value::from(12.5)));
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::order_not_found("o-1");
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order o-1 not found");

        let err = AppError::restaurant_not_found("r-9");
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);

        let err = AppError::invalid_path("");
        assert_eq!(err.code, ErrorCode::InvalidStorePath);
    }

    #[test]
    fn test_app_error_from_serde() {
        let parse: Result<Value, _> = serde_json::from_str("{not json");
        let err: AppError = parse.unwrap_err().into();
        assert_eq!(err.code, ErrorCode::RecordDecodeFailed);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::internal("boom");
        assert_eq!(err.to_string(), "boom");
    }
}
