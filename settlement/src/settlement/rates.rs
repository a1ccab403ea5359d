//! Rate resolution
//!
//! Three tiers, first present value wins:
//!
//! ```text
//! restaurant override ──▶ global settings record ──▶ hardcoded default
//! ```

use serde::Serialize;
use shared::models::financial_settings::{
    DEFAULT_DELIVERY_BASE_FEE, DEFAULT_DELIVERY_PER_KM, DEFAULT_PLATFORM_COMMISSION,
    DEFAULT_TAX_RATE,
};
use shared::{FinancialSettings, RateOverrides, Restaurant};

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn or_default(value: Option<f64>, default: f64, field: &'static str) -> f64 {
    finite(value).unwrap_or_else(|| {
        if value.is_some() {
            tracing::warn!(field, ?value, default, "Non-numeric setting, using default");
        }
        default
    })
}

/// Global rates with every field guaranteed finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalRates {
    /// Percent
    pub tax_rate: f64,
    /// Percent
    pub platform_commission: f64,
    pub delivery_base_fee: f64,
    pub delivery_per_km: f64,
}

impl GlobalRates {
    pub fn from_settings(settings: &FinancialSettings) -> Self {
        Self {
            tax_rate: or_default(settings.tax_rate, DEFAULT_TAX_RATE, "taxRate"),
            platform_commission: or_default(
                settings.platform_commission,
                DEFAULT_PLATFORM_COMMISSION,
                "platformCommission",
            ),
            delivery_base_fee: or_default(
                settings.delivery_base_fee,
                DEFAULT_DELIVERY_BASE_FEE,
                "deliveryBaseFee",
            ),
            delivery_per_km: or_default(
                settings.delivery_per_km,
                DEFAULT_DELIVERY_PER_KM,
                "deliveryPerKm",
            ),
        }
    }
}

impl Default for GlobalRates {
    fn default() -> Self {
        Self::from_settings(&FinancialSettings::empty())
    }
}

/// Rates applied to one order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveRates {
    /// Percent, never negative
    pub tax_rate: f64,
    /// Percent, never negative
    pub commission_rate: f64,
    /// Flat fee, never negative
    pub delivery_fee: f64,
}

impl EffectiveRates {
    /// Rates for an order of `restaurant`; an unknown restaurant gets the
    /// global rates unconditionally.
    pub fn resolve(restaurant: Option<&Restaurant>, global: &GlobalRates) -> Self {
        match restaurant {
            Some(r) => Self::with_overrides(&r.overrides(), global),
            None => Self::with_overrides(&RateOverrides::default(), global),
        }
    }

    pub fn with_overrides(overrides: &RateOverrides, global: &GlobalRates) -> Self {
        Self {
            tax_rate: finite(overrides.custom_tax_rate)
                .unwrap_or(global.tax_rate)
                .max(0.0),
            commission_rate: finite(overrides.commission_rate)
                .unwrap_or(global.platform_commission)
                .max(0.0),
            delivery_fee: finite(overrides.custom_delivery_fee)
                .unwrap_or(global.delivery_base_fee)
                .max(0.0),
        }
    }
}
