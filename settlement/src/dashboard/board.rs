//! Restaurant order board (LIVE / PAST tabs)

use serde::Serialize;
use shared::Order;

/// A restaurant's orders split by lifecycle, newest first in each tab
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OrderBoard {
    /// PLACED through OUT_FOR_DELIVERY
    pub live: Vec<Order>,
    /// DELIVERED or CANCELLED
    pub past: Vec<Order>,
}

impl OrderBoard {
    pub fn build(restaurant_id: &str, orders: &[Order]) -> Self {
        let mut mine: Vec<Order> = orders
            .iter()
            .filter(|o| o.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let (live, past) = mine.into_iter().partition(|o| o.status.is_live());
        Self { live, past }
    }

    pub fn len(&self) -> usize {
        self.live.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.past.is_empty()
    }
}
