//! Order status updates and per-restaurant order lookups

use std::sync::Arc;

use serde_json::json;
use shared::{Order, OrderStatus};

use super::fields;
use crate::dashboard::{OrderBoard, UserLifetimeStats};
use crate::store::{RecordStore, StorePath};
use crate::utils::{AppError, AppResult, ErrorCode};

pub struct OrderService {
    store: Arc<dyn RecordStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, order_id: &str) -> AppResult<Order> {
        let path = StorePath::order(order_id)?;
        let mut order: Order = self
            .store
            .fetch_once(&path)
            .await?
            .record()?
            .ok_or_else(|| AppError::order_not_found(order_id))?;
        if order.id.is_empty() {
            order.id = order_id.to_string();
        }
        Ok(order)
    }

    async fn all(&self) -> AppResult<Vec<Order>> {
        Ok(self
            .store
            .fetch_once(&StorePath::orders())
            .await?
            .records())
    }

    /// Orders of one restaurant, newest first
    pub async fn list_for_restaurant(&self, restaurant_id: &str) -> AppResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .all()
            .await?
            .into_iter()
            .filter(|o| o.restaurant_id == restaurant_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Order history of one customer, newest first
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .all()
            .await?
            .into_iter()
            .filter(|o| o.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Order count and spend shown on the customer detail view
    pub async fn user_lifetime_stats(&self, user_id: &str) -> AppResult<UserLifetimeStats> {
        Ok(UserLifetimeStats::compute(user_id, &self.all().await?))
    }

    pub async fn board(&self, restaurant_id: &str) -> AppResult<OrderBoard> {
        Ok(OrderBoard::build(restaurant_id, &self.all().await?))
    }

    /// Move an order forward. Terminal orders and illegal jumps are rejected.
    pub async fn update_status(&self, order_id: &str, next: OrderStatus) -> AppResult<Order> {
        let mut order = self.get(order_id).await?;
        let current = order.status;

        if current.is_terminal() {
            return Err(AppError::new(ErrorCode::OrderClosed)
                .with_detail("order_id", order_id)
                .with_detail("status", current.as_str()));
        }
        if !current.can_transition_to(next) {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot move order from {} to {}", current, next),
            )
            .with_detail("order_id", order_id)
            .with_detail("from", current.as_str())
            .with_detail("to", next.as_str()));
        }

        let path = StorePath::order(order_id)?;
        self.store
            .update(&path, fields([("status", json!(next.as_str()))]))
            .await?;

        crate::audit_log!("order_status", path.as_str(), format!("{} -> {}", current, next));
        order.status = next;
        Ok(order)
    }
}
