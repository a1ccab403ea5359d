//! Order records and their status lifecycle

pub mod status;
pub mod types;

pub use status::OrderStatus;
pub use types::{AssignedPartner, LineItem, Order, OrderRatings, PaymentMethod, Variant};
