//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Order errors
/// - 2xxx: Restaurant errors
/// - 3xxx: Delivery partner errors
/// - 4xxx: Financial settings errors
/// - 5xxx: Record store errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Order errors (1xxx)
    Order,
    /// Restaurant errors (2xxx)
    Restaurant,
    /// Delivery partner errors (3xxx)
    Partner,
    /// Financial settings errors (4xxx)
    Settings,
    /// Record store errors (5xxx)
    Store,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Order,
            2000..3000 => Self::Restaurant,
            3000..4000 => Self::Partner,
            4000..5000 => Self::Settings,
            5000..6000 => Self::Store,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Order => "order",
            Self::Restaurant => "restaurant",
            Self::Partner => "partner",
            Self::Settings => "settings",
            Self::Store => "store",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
