//! Restaurant partner dashboard

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use serde::Serialize;
use shared::{Order, Restaurant};

use crate::settlement::DateFilter;
use crate::utils::time::{local_date, local_hour};

/// Share of dish value shown to the restaurant as estimated net income
pub const NET_INCOME_SHARE: f64 = 0.90;

/// Estimated net income of one order: line items only, delivery and tax excluded
pub fn estimated_net_income(order: &Order) -> f64 {
    order.items_subtotal() * NET_INCOME_SHARE
}

/// One bar of the revenue chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
    /// `H:00` for hourly charts, `YYYY-MM-DD` for daily charts
    pub label: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDashboard {
    pub restaurant_id: String,
    pub filter: DateFilter,
    /// Non-cancelled orders in the window
    pub order_count: usize,
    pub net_income: f64,
    /// PLACED or CONFIRMED orders, regardless of window
    pub pending_count: usize,
    pub rating: Option<f64>,
    pub chart: Vec<RevenuePoint>,
}

impl RestaurantDashboard {
    pub fn compute<Tz: TimeZone>(
        restaurant: &Restaurant,
        orders: &[Order],
        filter: DateFilter,
        now: &DateTime<Tz>,
    ) -> Self {
        let window = filter.window(now);
        let tz = now.timezone();

        let mine: Vec<&Order> = orders
            .iter()
            .filter(|o| o.restaurant_id == restaurant.id && !o.is_cancelled())
            .collect();
        let in_window: Vec<&Order> = mine
            .iter()
            .copied()
            .filter(|o| window.contains(o.created_at))
            .collect();

        let chart = match filter {
            DateFilter::Today | DateFilter::Yesterday => hourly_chart(&in_window, &tz),
            _ => daily_chart(&in_window, filter, now),
        };

        Self {
            restaurant_id: restaurant.id.clone(),
            filter,
            order_count: in_window.len(),
            net_income: in_window.iter().map(|o| estimated_net_income(o)).sum(),
            pending_count: mine.iter().filter(|o| o.status.is_pending()).count(),
            rating: restaurant.rating,
            chart,
        }
    }
}

fn hourly_chart<Tz: TimeZone>(orders: &[&Order], tz: &Tz) -> Vec<RevenuePoint> {
    let mut buckets = [0.0_f64; 24];
    for order in orders {
        if let Some(hour) = local_hour(order.created_at, tz) {
            buckets[hour as usize] += estimated_net_income(order);
        }
    }
    buckets
        .iter()
        .enumerate()
        .map(|(hour, revenue)| RevenuePoint {
            label: format!("{}:00", hour),
            revenue: *revenue,
        })
        .collect()
}

fn daily_chart<Tz: TimeZone>(
    orders: &[&Order],
    filter: DateFilter,
    now: &DateTime<Tz>,
) -> Vec<RevenuePoint> {
    let tz = now.timezone();
    let today = now.date_naive();
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    // Zero-filled so the chart stays continuous
    if let Some(n) = filter.trailing_days() {
        for back in 0..n {
            if let Some(day) = today.checked_sub_days(Days::new(back)) {
                days.insert(day, 0.0);
            }
        }
    }

    for order in orders {
        if let Some(day) = local_date(order.created_at, &tz) {
            *days.entry(day).or_insert(0.0) += estimated_net_income(order);
        }
    }

    days.into_iter()
        .map(|(day, revenue)| RevenuePoint {
            label: day.format("%Y-%m-%d").to_string(),
            revenue,
        })
        .collect()
}

/// Lifetime totals for the admin restaurant detail view
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantLifetimeStats {
    pub order_count: usize,
    /// Gross of non-cancelled orders
    pub revenue: f64,
}

impl RestaurantLifetimeStats {
    pub fn compute(restaurant_id: &str, orders: &[Order]) -> Self {
        orders
            .iter()
            .filter(|o| o.restaurant_id == restaurant_id && !o.is_cancelled())
            .fold(Self::default(), |acc, o| Self {
                order_count: acc.order_count + 1,
                revenue: acc.revenue + o.total(),
            })
    }
}
