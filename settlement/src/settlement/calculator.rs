//! Settlement calculator
//!
//! Pure function of (orders, restaurants, settings, filter, now). Every run
//! starts from zero; nothing is cached between runs.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Local, TimeZone};
use shared::{FinancialSettings, Order, Restaurant};

use super::filter::DateFilter;
use super::metrics::{
    FinancialMetrics, OrderSplit, PartnerMetrics, RestaurantSettlement, SettlementReport,
};
use super::rates::{EffectiveRates, GlobalRates};

/// Name used when an unlisted restaurant's order carries none
pub const UNKNOWN_RESTAURANT: &str = "Unknown";

struct Bucket<'a> {
    restaurant: Option<&'a Restaurant>,
    settlement: RestaurantSettlement,
}

/// Run settlement with the window resolved against `now`
pub fn compute_at<Tz: TimeZone>(
    orders: &[Order],
    restaurants: &[Restaurant],
    settings: &FinancialSettings,
    filter: DateFilter,
    now: &DateTime<Tz>,
) -> SettlementReport {
    let window = filter.window(now);
    let rates = GlobalRates::from_settings(settings);

    // Known restaurants are seeded in list order; first entry wins on duplicate ids
    let mut buckets: Vec<Bucket<'_>> = Vec::with_capacity(restaurants.len());
    let mut bucket_index: HashMap<&str, usize> = HashMap::with_capacity(restaurants.len());
    for restaurant in restaurants {
        if bucket_index.contains_key(restaurant.id.as_str()) {
            continue;
        }
        bucket_index.insert(restaurant.id.as_str(), buckets.len());
        buckets.push(Bucket {
            restaurant: Some(restaurant),
            settlement: RestaurantSettlement {
                restaurant_id: restaurant.id.clone(),
                name: restaurant.name.clone(),
                unlisted: false,
                order_count: 0,
                metrics: FinancialMetrics::default(),
            },
        });
    }

    let mut partners: Vec<PartnerMetrics> = Vec::new();
    let mut partner_index: HashMap<&str, usize> = HashMap::new();
    let mut totals = FinancialMetrics::default();
    let mut order_count = 0u64;

    for order in orders {
        if order.is_cancelled() || !window.contains(order.created_at) {
            continue;
        }
        order_count += 1;

        let slot = match bucket_index.get(order.restaurant_id.as_str()) {
            Some(&slot) => slot,
            None => {
                let name = if order.restaurant_name.is_empty() {
                    UNKNOWN_RESTAURANT.to_string()
                } else {
                    order.restaurant_name.clone()
                };
                tracing::debug!(
                    restaurant_id = %order.restaurant_id,
                    order_id = %order.id,
                    "Order references unlisted restaurant"
                );
                bucket_index.insert(order.restaurant_id.as_str(), buckets.len());
                buckets.push(Bucket {
                    restaurant: None,
                    settlement: RestaurantSettlement {
                        restaurant_id: order.restaurant_id.clone(),
                        name,
                        unlisted: true,
                        order_count: 0,
                        metrics: FinancialMetrics::default(),
                    },
                });
                buckets.len() - 1
            }
        };

        let bucket = &mut buckets[slot];
        let effective = EffectiveRates::resolve(bucket.restaurant, &rates);
        let total = order.total();
        let split = OrderSplit::compute(total, &effective);

        totals.add(total, &split, order.payment_method);
        bucket.settlement.order_count += 1;
        bucket
            .settlement
            .metrics
            .add(total, &split, order.payment_method);

        // Assignments without a partner id cannot be credited
        if let Some(partner) = order.delivery_partner.as_ref().filter(|p| !p.id.is_empty()) {
            let idx = *partner_index
                .entry(partner.id.as_str())
                .or_insert_with(|| {
                    partners.push(PartnerMetrics {
                        partner_id: partner.id.clone(),
                        name: partner.name.clone(),
                        deliveries_count: 0,
                        total_fees: 0.0,
                    });
                    partners.len() - 1
                });
            partners[idx].deliveries_count += 1;
            partners[idx].total_fees += split.delivery_fee;
        }
    }

    let mut restaurants: Vec<RestaurantSettlement> = buckets
        .into_iter()
        .map(|b| b.settlement)
        .filter(|s| s.order_count > 0)
        .collect();
    restaurants.sort_by(|a, b| {
        descending(a.metrics.restaurant_payable, b.metrics.restaurant_payable)
    });
    partners.sort_by(|a, b| descending(a.total_fees, b.total_fees));

    tracing::debug!(
        filter = %filter,
        orders = orders.len(),
        included = order_count,
        restaurants = restaurants.len(),
        partners = partners.len(),
        gross = totals.gross_revenue,
        "Settlement computed"
    );

    SettlementReport {
        filter,
        window,
        computed_at: now.timestamp_millis(),
        rates,
        order_count,
        totals,
        restaurants,
        partners,
    }
}

/// Run settlement against the local wall clock
pub fn compute_now(
    orders: &[Order],
    restaurants: &[Restaurant],
    settings: &FinancialSettings,
    filter: DateFilter,
) -> SettlementReport {
    compute_at(orders, restaurants, settings, filter, &Local::now())
}

/// Stable descending order; ties keep first-seen order
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
