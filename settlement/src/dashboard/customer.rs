//! Customer detail view (admin CRM)

use serde::Serialize;
use shared::Order;

/// Lifetime figures for one customer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLifetimeStats {
    /// Every order placed, cancelled included
    pub order_count: usize,
    /// Gross of non-cancelled orders
    pub total_spent: f64,
}

impl UserLifetimeStats {
    pub fn compute(user_id: &str, orders: &[Order]) -> Self {
        orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .fold(Self::default(), |acc, o| Self {
                order_count: acc.order_count + 1,
                total_spent: if o.is_cancelled() {
                    acc.total_spent
                } else {
                    acc.total_spent + o.total()
                },
            })
    }
}
