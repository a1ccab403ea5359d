//! Order settlement
//!
//! Splits each qualifying order's gross amount into base food value, tax,
//! commission, delivery fee and restaurant payable, then aggregates
//! platform-wide, per restaurant and per delivery partner.
//!
//! ```text
//! orders      ─┐
//! restaurants ─┼─▶ filter (status, window) ─▶ OrderSplit ─▶ SettlementReport
//! settings    ─┘
//! ```

mod calculator;
mod filter;
mod metrics;
mod rates;

pub use calculator::{UNKNOWN_RESTAURANT, compute_at, compute_now};
pub use filter::{DateFilter, TimeWindow};
pub use metrics::{
    FinancialMetrics, OrderSplit, PartnerMetrics, RestaurantSettlement, SettlementReport,
};
pub use rates::{EffectiveRates, GlobalRates};

#[cfg(test)]
mod tests;
