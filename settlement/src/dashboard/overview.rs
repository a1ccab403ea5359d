//! Admin overview: platform-wide counters and recent orders

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use shared::{DeliveryPartner, Order, Restaurant};

use crate::store::{RecordStore, StorePath};
use crate::utils::AppResult;
use crate::utils::time::start_of_today;

/// Number of orders shown in the "recent" list
pub const RECENT_ORDERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformOverview {
    /// Gross of every non-cancelled order
    pub total_revenue: f64,
    /// Gross of non-cancelled orders since local midnight
    pub todays_revenue: f64,
    /// All orders, cancelled included
    pub total_orders: usize,
    pub approved_restaurants: usize,
    pub pending_restaurants: usize,
    pub total_users: usize,
    pub approved_partners: usize,
    /// Newest first, any status
    pub recent_orders: Vec<Order>,
}

impl PlatformOverview {
    pub fn compute<Tz: TimeZone>(
        orders: &[Order],
        restaurants: &[Restaurant],
        total_users: usize,
        partners: &[DeliveryPartner],
        now: &DateTime<Tz>,
    ) -> Self {
        let today_start = start_of_today(now);

        let (total_revenue, todays_revenue) = orders
            .iter()
            .filter(|o| !o.is_cancelled())
            .fold((0.0, 0.0), |(all, today), o| {
                let today = if o.created_at >= today_start {
                    today + o.total()
                } else {
                    today
                };
                (all + o.total(), today)
            });

        let approved_restaurants = restaurants.iter().filter(|r| r.is_approved).count();

        let mut recent_orders = orders.to_vec();
        recent_orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_orders.truncate(RECENT_ORDERS);

        Self {
            total_revenue,
            todays_revenue,
            total_orders: orders.len(),
            approved_restaurants,
            pending_restaurants: restaurants.len() - approved_restaurants,
            total_users,
            approved_partners: partners.iter().filter(|p| p.is_approved).count(),
            recent_orders,
        }
    }

    /// Read orders, users, restaurants and partners once and summarize
    pub async fn fetch<Tz: TimeZone>(
        store: &dyn RecordStore,
        now: &DateTime<Tz>,
    ) -> AppResult<Self> {
        let orders = store.fetch_once(&StorePath::orders()).await?;
        let users = store.fetch_once(&StorePath::users()).await?;
        let restaurants = store.fetch_once(&StorePath::restaurants()).await?;
        let partners = store.fetch_once(&StorePath::delivery_partners()).await?;

        Ok(Self::compute(
            &orders.records::<Order>(),
            &restaurants.records::<Restaurant>(),
            users.child_count(),
            &partners.records::<DeliveryPartner>(),
            now,
        ))
    }
}
