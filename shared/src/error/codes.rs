//! Unified error codes for the partner console
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Order errors
//! - 2xxx: Restaurant errors
//! - 3xxx: Delivery partner errors
//! - 4xxx: Financial settings errors
//! - 5xxx: Record store errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Order ====================
    /// Order not found
    OrderNotFound = 1001,
    /// Status change not allowed from the current status
    InvalidStatusTransition = 1002,
    /// Order is already delivered or cancelled
    OrderClosed = 1003,

    // ==================== 2xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 2001,
    /// Override rate is not a finite, non-negative number
    InvalidRateOverride = 2002,

    // ==================== 3xxx: Delivery partner ====================
    /// Delivery partner not found
    PartnerNotFound = 3001,

    // ==================== 4xxx: Settings ====================
    /// Financial settings record is invalid
    SettingsInvalid = 4001,

    // ==================== 5xxx: Store ====================
    /// Store path is empty or malformed
    InvalidStorePath = 5001,
    /// Record could not be decoded
    RecordDecodeFailed = 5002,
    /// Snapshot export could not be loaded
    SnapshotLoadFailed = 5003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9005,
    /// IO error
    IoError = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidStatusTransition => "Order status transition is not allowed",
            ErrorCode::OrderClosed => "Order is already delivered or cancelled",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::InvalidRateOverride => "Rate override must be a non-negative number",

            // Partner
            ErrorCode::PartnerNotFound => "Delivery partner not found",

            // Settings
            ErrorCode::SettingsInvalid => "Financial settings are invalid",

            // Store
            ErrorCode::InvalidStorePath => "Store path is invalid",
            ErrorCode::RecordDecodeFailed => "Record could not be decoded",
            ErrorCode::SnapshotLoadFailed => "Snapshot export could not be loaded",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::IoError => "IO error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            1001 => Ok(ErrorCode::OrderNotFound),
            1002 => Ok(ErrorCode::InvalidStatusTransition),
            1003 => Ok(ErrorCode::OrderClosed),

            // Restaurant
            2001 => Ok(ErrorCode::RestaurantNotFound),
            2002 => Ok(ErrorCode::InvalidRateOverride),

            // Partner
            3001 => Ok(ErrorCode::PartnerNotFound),

            // Settings
            4001 => Ok(ErrorCode::SettingsInvalid),

            // Store
            5001 => Ok(ErrorCode::InvalidStorePath),
            5002 => Ok(ErrorCode::RecordDecodeFailed),
            5003 => Ok(ErrorCode::SnapshotLoadFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::IoError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
