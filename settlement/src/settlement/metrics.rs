//! Per-order split and the aggregates built from it

use serde::Serialize;
use shared::PaymentMethod;

use super::filter::{DateFilter, TimeWindow};
use super::rates::{EffectiveRates, GlobalRates};
use crate::money::round_for_display;

/// How one order's gross amount divides up
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSplit {
    /// `max(0, total - delivery fee)`
    pub food_portion_with_tax: f64,
    pub base_food_value: f64,
    pub tax_collected: f64,
    pub commission: f64,
    pub restaurant_payable: f64,
    pub delivery_fee: f64,
}

impl OrderSplit {
    /// Split a tax-inclusive gross `total`.
    ///
    /// Tax is backed out of the food portion; commission applies to the
    /// pre-tax food value only.
    pub fn compute(total: f64, rates: &EffectiveRates) -> Self {
        let food_portion_with_tax = (total - rates.delivery_fee).max(0.0);
        let base_food_value = food_portion_with_tax / (1.0 + rates.tax_rate / 100.0);
        let tax_collected = food_portion_with_tax - base_food_value;
        let commission = base_food_value * (rates.commission_rate / 100.0);

        Self {
            food_portion_with_tax,
            base_food_value,
            tax_collected,
            commission,
            restaurant_payable: base_food_value - commission,
            delivery_fee: rates.delivery_fee,
        }
    }
}

/// Aggregated money figures
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    pub gross_revenue: f64,
    pub base_food_value: f64,
    pub tax_collected: f64,
    pub commission: f64,
    pub delivery_fees: f64,
    /// Always `base_food_value - commission`
    pub restaurant_payable: f64,
    pub cash_revenue: f64,
    pub online_revenue: f64,
}

impl FinancialMetrics {
    /// Fold one order in at full precision
    pub fn add(&mut self, total: f64, split: &OrderSplit, payment: PaymentMethod) {
        self.gross_revenue += total;
        self.base_food_value += split.base_food_value;
        self.tax_collected += split.tax_collected;
        self.commission += split.commission;
        self.delivery_fees += split.delivery_fee;
        self.restaurant_payable = self.base_food_value - self.commission;

        match payment {
            PaymentMethod::Online => self.online_revenue += total,
            PaymentMethod::CashOnDelivery => self.cash_revenue += total,
        }
    }

    /// Copy with every figure rounded to `dp` places
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            gross_revenue: round_for_display(self.gross_revenue, dp),
            base_food_value: round_for_display(self.base_food_value, dp),
            tax_collected: round_for_display(self.tax_collected, dp),
            commission: round_for_display(self.commission, dp),
            delivery_fees: round_for_display(self.delivery_fees, dp),
            restaurant_payable: round_for_display(self.restaurant_payable, dp),
            cash_revenue: round_for_display(self.cash_revenue, dp),
            online_revenue: round_for_display(self.online_revenue, dp),
        }
    }
}

/// One restaurant's share of the window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSettlement {
    pub restaurant_id: String,
    pub name: String,
    /// The order referenced a restaurant missing from the restaurant list
    pub unlisted: bool,
    pub order_count: u64,
    #[serde(flatten)]
    pub metrics: FinancialMetrics,
}

/// Deliveries and fees earned by one delivery partner
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerMetrics {
    pub partner_id: String,
    pub name: String,
    pub deliveries_count: u64,
    pub total_fees: f64,
}

/// Result of one settlement run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReport {
    pub filter: DateFilter,
    pub window: TimeWindow,
    /// Unix millis of the `now` the window was resolved against
    pub computed_at: i64,
    /// Global rates in force for this run
    pub rates: GlobalRates,
    /// Orders that passed the status and window filters
    pub order_count: u64,
    pub totals: FinancialMetrics,
    /// Restaurants with at least one qualifying order, highest payable first
    pub restaurants: Vec<RestaurantSettlement>,
    /// Partners with at least one qualifying delivery, highest fees first
    pub partners: Vec<PartnerMetrics>,
}

impl SettlementReport {
    /// Copy with every money figure rounded to `dp` places
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            totals: self.totals.rounded(dp),
            restaurants: self
                .restaurants
                .iter()
                .map(|r| RestaurantSettlement {
                    metrics: r.metrics.rounded(dp),
                    ..r.clone()
                })
                .collect(),
            partners: self
                .partners
                .iter()
                .map(|p| PartnerMetrics {
                    total_fees: round_for_display(p.total_fees, dp),
                    ..p.clone()
                })
                .collect(),
            ..self.clone()
        }
    }

    pub fn restaurant(&self, restaurant_id: &str) -> Option<&RestaurantSettlement> {
        self.restaurants
            .iter()
            .find(|r| r.restaurant_id == restaurant_id)
    }

    pub fn partner(&self, partner_id: &str) -> Option<&PartnerMetrics> {
        self.partners.iter().find(|p| p.partner_id == partner_id)
    }
}
