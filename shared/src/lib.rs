//! Shared types for the partner console
//!
//! Domain records (orders, restaurants, delivery partners, the global
//! financial settings record) and the unified error system used by the
//! settlement crate and any console front end.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{DeliveryPartner, FinancialSettings, RateOverrides, Restaurant};
pub use order::{AssignedPartner, LineItem, Order, OrderStatus, PaymentMethod};
pub use serde::{Deserialize, Serialize};
