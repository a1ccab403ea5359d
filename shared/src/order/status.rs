//! Order status state machine
//!
//! ```text
//! PLACED ──▶ CONFIRMED ──▶ PREPARING ──▶ READY_FOR_PICKUP ──▶ OUT_FOR_DELIVERY ──▶ DELIVERED
//!   │
//!   └──▶ CANCELLED
//! ```
//!
//! The store does not enforce these transitions; callers that write a status
//! check [`OrderStatus::can_transition_to`] first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Placed,
    Confirmed,
    Preparing,
    /// Marked by the restaurant
    ReadyForPickup,
    /// Marked by the delivery partner
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Placed,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::ReadyForPickup,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Wire name (`READY_FOR_PICKUP`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "PLACED",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::ReadyForPickup => "READY_FOR_PICKUP",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Legal forward transitions
    pub fn next_statuses(&self) -> &'static [OrderStatus] {
        match self {
            Self::Placed => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            Self::Confirmed => &[OrderStatus::Preparing],
            Self::Preparing => &[OrderStatus::ReadyForPickup],
            Self::ReadyForPickup => &[OrderStatus::OutForDelivery],
            Self::OutForDelivery => &[OrderStatus::Delivered],
            Self::Delivered | Self::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    /// Transitions the restaurant console offers for an order in this status.
    ///
    /// Pickup and delivery are set by the delivery partner, so nothing is
    /// offered from READY_FOR_PICKUP onwards.
    pub fn console_actions(&self) -> &'static [OrderStatus] {
        match self {
            Self::Placed => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            Self::Confirmed => &[OrderStatus::Preparing],
            Self::Preparing => &[OrderStatus::ReadyForPickup],
            _ => &[],
        }
    }

    /// DELIVERED and CANCELLED accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Shown on the LIVE board
    pub fn is_live(&self) -> bool {
        !self.is_terminal()
    }

    /// Awaiting restaurant attention (PLACED or CONFIRMED)
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Placed | Self::Confirmed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
