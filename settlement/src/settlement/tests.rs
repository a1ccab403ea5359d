use super::*;
use chrono::{DateTime, FixedOffset, TimeZone};
use shared::{AssignedPartner, FinancialSettings, Order, OrderStatus, PaymentMethod, Restaurant};

const EPS: f64 = 1e-6;

fn zone() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
}

/// 2024-03-15 14:00 local
fn now() -> DateTime<FixedOffset> {
    zone().with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap()
}

fn local_ms(d: u32, h: u32, m: u32) -> i64 {
    zone()
        .with_ymd_and_hms(2024, 3, d, h, m, 0)
        .unwrap()
        .timestamp_millis()
}

fn order(id: &str, restaurant_id: &str, total: f64) -> Order {
    Order {
        id: id.into(),
        restaurant_id: restaurant_id.into(),
        restaurant_name: format!("{} (denormalized)", restaurant_id),
        total_amount: Some(total),
        status: OrderStatus::Delivered,
        created_at: local_ms(15, 10, 0),
        ..Default::default()
    }
}

fn restaurant(id: &str, name: &str) -> Restaurant {
    Restaurant {
        id: id.into(),
        name: name.into(),
        ..Default::default()
    }
}

fn partner(id: &str, name: &str) -> Option<AssignedPartner> {
    Some(AssignedPartner {
        id: id.into(),
        name: name.into(),
        ..Default::default()
    })
}

fn run(orders: &[Order], restaurants: &[Restaurant], filter: DateFilter) -> SettlementReport {
    compute_at(
        orders,
        restaurants,
        &FinancialSettings::default(),
        filter,
        &now(),
    )
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

// ========== Per-order split ==========

#[test]
fn test_worked_example_500() {
    let rates = EffectiveRates {
        tax_rate: 5.0,
        commission_rate: 20.0,
        delivery_fee: 40.0,
    };
    let split = OrderSplit::compute(500.0, &rates);

    assert_close(split.food_portion_with_tax, 460.0, EPS);
    assert_close(split.base_food_value, 438.095, 0.01);
    assert_close(split.tax_collected, 21.905, 0.01);
    assert_close(split.commission, 87.619, 0.01);
    assert_close(split.restaurant_payable, 350.476, 0.01);
}

#[test]
fn test_worked_example_through_calculator() {
    let report = run(
        &[order("o1", "r1", 500.0)],
        &[restaurant("r1", "Spice Hub")],
        DateFilter::AllTime,
    );

    let t = &report.totals;
    assert_eq!(report.order_count, 1);
    assert_close(t.gross_revenue, 500.0, EPS);
    assert_close(t.base_food_value, 438.095, 0.01);
    assert_close(t.tax_collected, 21.905, 0.01);
    assert_close(t.commission, 87.619, 0.01);
    assert_close(t.restaurant_payable, 350.476, 0.01);
    assert_close(t.delivery_fees, 40.0, EPS);
    assert_eq!(report.restaurants[0].metrics, report.totals);
}

#[test]
fn test_split_identity_across_totals() {
    let rates = EffectiveRates {
        tax_rate: 12.5,
        commission_rate: 18.0,
        delivery_fee: 35.0,
    };
    for total in [0.0, 10.0, 35.0, 35.01, 99.99, 460.0, 12345.67] {
        let split = OrderSplit::compute(total, &rates);
        let expected = (total - rates.delivery_fee).max(0.0);
        assert_close(split.base_food_value + split.tax_collected, expected, EPS);
        assert_eq!(
            split.restaurant_payable,
            split.base_food_value - split.commission
        );
    }
}

#[test]
fn test_clamp_when_fee_exceeds_total() {
    let report = run(&[order("o1", "r1", 30.0)], &[restaurant("r1", "Tiny")], DateFilter::AllTime);

    let t = &report.totals;
    assert_eq!(t.base_food_value, 0.0);
    assert_eq!(t.tax_collected, 0.0);
    assert_eq!(t.commission, 0.0);
    assert_eq!(t.restaurant_payable, 0.0);
    assert_eq!(t.gross_revenue, 30.0);
    assert_eq!(t.delivery_fees, 40.0);
}

#[test]
fn test_zero_tax_and_zero_fee() {
    let mut r = restaurant("r1", "Flat");
    r.custom_tax_rate = Some(0.0);
    r.custom_delivery_fee = Some(0.0);
    let report = run(&[order("o1", "r1", 200.0)], &[r], DateFilter::AllTime);

    assert_eq!(report.totals.base_food_value, 200.0);
    assert_eq!(report.totals.tax_collected, 0.0);
    assert_close(report.totals.commission, 40.0, EPS);
    assert_close(report.totals.restaurant_payable, 160.0, EPS);
}

#[test]
fn test_missing_total_counts_as_zero() {
    let mut o = order("o1", "r1", 0.0);
    o.total_amount = None;
    let report = run(&[o], &[restaurant("r1", "R")], DateFilter::AllTime);

    assert_eq!(report.order_count, 1);
    assert_eq!(report.totals.gross_revenue, 0.0);
    assert_eq!(report.totals.base_food_value, 0.0);
}

// ========== Aggregation ==========

#[test]
fn test_payable_identity_after_many_orders() {
    let orders: Vec<Order> = (0..250)
        .map(|i| order(&format!("o{}", i), "r1", 100.0 + i as f64 * 1.37))
        .collect();
    let report = run(&orders, &[restaurant("r1", "R")], DateFilter::AllTime);

    let t = &report.totals;
    assert_eq!(t.restaurant_payable, t.base_food_value - t.commission);
    let r = &report.restaurants[0].metrics;
    assert_eq!(r.restaurant_payable, r.base_food_value - r.commission);
}

#[test]
fn test_payment_partition() {
    let mut online = order("o1", "r1", 320.5);
    online.payment_method = PaymentMethod::Online;
    let cash = order("o2", "r1", 199.5);
    let mut online2 = order("o3", "r2", 80.0);
    online2.payment_method = PaymentMethod::Online;

    let report = run(
        &[online, cash, online2],
        &[restaurant("r1", "A"), restaurant("r2", "B")],
        DateFilter::AllTime,
    );

    let t = &report.totals;
    assert_close(t.online_revenue, 400.5, EPS);
    assert_close(t.cash_revenue, 199.5, EPS);
    assert_close(t.cash_revenue + t.online_revenue, t.gross_revenue, EPS);

    let r1 = report.restaurant("r1").unwrap();
    assert_close(r1.metrics.online_revenue, 320.5, EPS);
    assert_close(r1.metrics.cash_revenue, 199.5, EPS);
}

#[test]
fn test_cancelled_orders_contribute_nothing() {
    let mut cancelled = order("o1", "r1", 500.0);
    cancelled.status = OrderStatus::Cancelled;
    cancelled.delivery_partner = partner("p1", "Ravi");

    for filter in DateFilter::ALL {
        let report = run(std::slice::from_ref(&cancelled), &[restaurant("r1", "A")], filter);
        assert_eq!(report.order_count, 0);
        assert_eq!(report.totals, FinancialMetrics::default());
        assert!(report.restaurants.is_empty());
        assert!(report.partners.is_empty());
    }
}

#[test]
fn test_non_delivered_statuses_are_included() {
    let orders: Vec<Order> = OrderStatus::ALL
        .iter()
        .enumerate()
        .map(|(i, status)| Order {
            status: *status,
            ..order(&format!("o{}", i), "r1", 100.0)
        })
        .collect();
    let report = run(&orders, &[restaurant("r1", "A")], DateFilter::AllTime);
    assert_eq!(report.order_count, OrderStatus::ALL.len() as u64 - 1);
}

#[test]
fn test_override_precedence_changes_tax() {
    let mut custom = restaurant("r1", "Custom");
    custom.custom_tax_rate = Some(10.0);
    let plain = restaurant("r2", "Plain");

    let report = run(
        &[order("o1", "r1", 500.0), order("o2", "r2", 500.0)],
        &[custom, plain],
        DateFilter::AllTime,
    );

    let custom_tax = report.restaurant("r1").unwrap().metrics.tax_collected;
    let plain_tax = report.restaurant("r2").unwrap().metrics.tax_collected;
    assert_close(custom_tax, 460.0 - 460.0 / 1.10, EPS);
    assert_close(plain_tax, 460.0 - 460.0 / 1.05, EPS);
    assert!(custom_tax > plain_tax);
}

#[test]
fn test_settings_record_feeds_defaults() {
    let settings = FinancialSettings {
        tax_rate: Some(18.0),
        delivery_base_fee: Some(f64::NAN),
        delivery_per_km: None,
        platform_commission: Some(10.0),
    };
    let report = compute_at(
        &[order("o1", "r1", 158.0)],
        &[restaurant("r1", "R")],
        &settings,
        DateFilter::AllTime,
        &now(),
    );

    assert_close(report.totals.base_food_value, 100.0, EPS);
    assert_close(report.totals.tax_collected, 18.0, EPS);
    assert_close(report.totals.commission, 10.0, EPS);
    assert_eq!(report.totals.delivery_fees, 40.0);
    assert_eq!(report.rates.delivery_base_fee, 40.0);
}

#[test]
fn test_unlisted_restaurant_uses_globals_and_order_name() {
    let mut orphan = order("o1", "gone", 500.0);
    orphan.restaurant_name = "Closed Kitchen".into();
    let mut nameless = order("o2", "ghost", 100.0);
    nameless.restaurant_name = String::new();

    let report = run(&[orphan, nameless], &[restaurant("r1", "Listed")], DateFilter::AllTime);

    assert_eq!(report.restaurants.len(), 2);
    let gone = report.restaurant("gone").unwrap();
    assert_eq!(gone.name, "Closed Kitchen");
    assert!(gone.unlisted);
    assert_close(gone.metrics.base_food_value, 460.0 / 1.05, EPS);

    let ghost = report.restaurant("ghost").unwrap();
    assert_eq!(ghost.name, UNKNOWN_RESTAURANT);
    assert!(report.restaurant("r1").is_none());
}

#[test]
fn test_listed_name_wins_over_denormalized() {
    let report = run(
        &[order("o1", "r1", 100.0)],
        &[restaurant("r1", "Current Name")],
        DateFilter::AllTime,
    );
    let r = report.restaurant("r1").unwrap();
    assert_eq!(r.name, "Current Name");
    assert!(!r.unlisted);
}

#[test]
fn test_restaurants_sorted_by_payable() {
    let report = run(
        &[
            order("o1", "small", 100.0),
            order("o2", "big", 900.0),
            order("o3", "mid", 400.0),
        ],
        &[restaurant("small", "S"), restaurant("mid", "M"), restaurant("big", "B")],
        DateFilter::AllTime,
    );
    let ids: Vec<&str> = report
        .restaurants
        .iter()
        .map(|r| r.restaurant_id.as_str())
        .collect();
    assert_eq!(ids, vec!["big", "mid", "small"]);
}

// ========== Partners ==========

#[test]
fn test_partner_aggregation() {
    let mut fee40 = restaurant("r1", "Forty");
    fee40.custom_delivery_fee = Some(40.0);
    let mut fee50 = restaurant("r2", "Fifty");
    fee50.custom_delivery_fee = Some(50.0);

    let mut a = order("o1", "r1", 300.0);
    a.delivery_partner = partner("p1", "Ravi");
    let mut b = order("o2", "r2", 300.0);
    b.delivery_partner = partner("p1", "Ravi");
    let unassigned = order("o3", "r1", 300.0);

    let report = run(&[a, b, unassigned], &[fee40, fee50], DateFilter::AllTime);

    assert_eq!(report.partners.len(), 1);
    let p = report.partner("p1").unwrap();
    assert_eq!(p.name, "Ravi");
    assert_eq!(p.deliveries_count, 2);
    assert_close(p.total_fees, 90.0, EPS);
    assert!(report.partner("p2").is_none());
}

#[test]
fn test_malformed_optional_fields_keep_revenue() {
    use crate::store::{Snapshot, StorePath};
    use serde_json::json;

    let snap = Snapshot::new(
        StorePath::orders(),
        Some(json!({
            "o1": {
                "restaurantId": "r1", "totalAmount": 500, "status": "DELIVERED",
                "createdAt": local_ms(15, 10, 0), "ratings": "5"
            },
            "o2": {
                "restaurantId": "r1", "totalAmount": 500, "status": "DELIVERED",
                "createdAt": local_ms(15, 11, 0), "deliveryPartner": { "name": "Ravi" }
            }
        })),
    );
    let orders: Vec<Order> = snap.records();
    assert_eq!(orders.len(), 2);

    let report = run(&orders, &[restaurant("r1", "A")], DateFilter::AllTime);
    assert_eq!(report.order_count, 2);
    assert_close(report.totals.gross_revenue, 1000.0, EPS);
    assert_close(report.totals.cash_revenue, 1000.0, EPS);
    assert_close(report.totals.delivery_fees, 80.0, EPS);
    // No id, no partner row
    assert!(report.partners.is_empty());
}

// ========== Date windows ==========

#[test]
fn test_midnight_order_is_today_not_yesterday() {
    let mut o = order("o1", "r1", 100.0);
    o.created_at = local_ms(15, 0, 0);
    let restaurants = [restaurant("r1", "A")];

    assert_eq!(run(std::slice::from_ref(&o), &restaurants, DateFilter::Today).order_count, 1);
    assert_eq!(run(std::slice::from_ref(&o), &restaurants, DateFilter::Yesterday).order_count, 0);

    o.created_at -= 1;
    assert_eq!(run(std::slice::from_ref(&o), &restaurants, DateFilter::Today).order_count, 0);
    assert_eq!(run(std::slice::from_ref(&o), &restaurants, DateFilter::Yesterday).order_count, 1);
}

#[test]
fn test_trailing_windows_and_future_orders() {
    let restaurants = [restaurant("r1", "A")];
    let at = |ms: i64| Order {
        created_at: ms,
        ..order("o", "r1", 100.0)
    };
    let eight_days_ago = at(local_ms(7, 12, 0));
    let six_days_ago = at(local_ms(9, 12, 0));
    let future = at(local_ms(16, 9, 0));
    let orders = [eight_days_ago, six_days_ago, future];

    assert_eq!(run(&orders, &restaurants, DateFilter::Last7Days).order_count, 1);
    assert_eq!(run(&orders, &restaurants, DateFilter::Last30Days).order_count, 2);
    assert_eq!(run(&orders, &restaurants, DateFilter::AllTime).order_count, 3);
}

#[test]
fn test_empty_inputs() {
    let report = run(&[], &[restaurant("r1", "Idle")], DateFilter::Today);
    assert_eq!(report.order_count, 0);
    assert!(report.restaurants.is_empty());
    assert!(report.partners.is_empty());
    assert_eq!(report.filter, DateFilter::Today);
    assert_eq!(report.computed_at, now().timestamp_millis());
}

// ========== Display ==========

#[test]
fn test_rounded_report_keeps_structure() {
    let mut o = order("o1", "r1", 500.0);
    o.delivery_partner = partner("p1", "Ravi");
    let report = run(&[o], &[restaurant("r1", "A")], DateFilter::AllTime);
    let shown = report.rounded(0);

    assert_eq!(shown.totals.base_food_value, 438.0);
    assert_eq!(shown.totals.tax_collected, 22.0);
    assert_eq!(shown.totals.commission, 88.0);
    assert_eq!(shown.totals.restaurant_payable, 350.0);
    assert_eq!(shown.restaurants[0].metrics.base_food_value, 438.0);
    assert_eq!(shown.partners[0].total_fees, 40.0);
    assert_eq!(shown.order_count, report.order_count);

    let json = serde_json::to_value(&shown).unwrap();
    assert_eq!(json["filter"], "ALL_TIME");
    assert_eq!(json["restaurants"][0]["restaurantPayable"], 350.0);
    assert_eq!(json["partners"][0]["deliveriesCount"], 1);
}

#[test]
fn test_compute_now_all_time_matches_fixed_clock() {
    let orders = vec![order("o1", "r1", 500.0), order("o2", "r2", 200.0)];
    let restaurants = vec![restaurant("r1", "A")];
    let settings = FinancialSettings::default();

    let live = compute_now(&orders, &restaurants, &settings, DateFilter::AllTime);
    let fixed = compute_at(&orders, &restaurants, &settings, DateFilter::AllTime, &now());

    assert_eq!(live.order_count, fixed.order_count);
    assert_eq!(live.totals, fixed.totals);
    assert_eq!(live.restaurants, fixed.restaurants);
    assert!(live.computed_at >= fixed.computed_at);
}
