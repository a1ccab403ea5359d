//! Global Financial Settings Model (`adminSettings`)

use crate::util::lenient_f64;
use serde::{Deserialize, Serialize};

/// Fallback tax rate (percent)
pub const DEFAULT_TAX_RATE: f64 = 5.0;
/// Fallback platform commission (percent)
pub const DEFAULT_PLATFORM_COMMISSION: f64 = 20.0;
/// Fallback flat delivery fee (currency units)
pub const DEFAULT_DELIVERY_BASE_FEE: f64 = 40.0;
/// Fallback per-kilometre delivery rate (currency units)
pub const DEFAULT_DELIVERY_PER_KM: f64 = 10.0;

/// Platform-wide financial settings record (singleton).
///
/// Every field is optional on the wire; consumers substitute the
/// `DEFAULT_*` constants for anything missing or non-numeric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSettings {
    /// Default tax rate in percent
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tax_rate: Option<f64>,
    /// Default flat delivery fee
    #[serde(default, deserialize_with = "lenient_f64")]
    pub delivery_base_fee: Option<f64>,
    /// Per-kilometre delivery rate (not used by settlement)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub delivery_per_km: Option<f64>,
    /// Default platform commission in percent
    #[serde(default, deserialize_with = "lenient_f64")]
    pub platform_commission: Option<f64>,
}

impl FinancialSettings {
    /// Record with all fields absent
    pub const fn empty() -> Self {
        Self {
            tax_rate: None,
            delivery_base_fee: None,
            delivery_per_km: None,
            platform_commission: None,
        }
    }

    /// Copy with every missing or non-finite field replaced by its default
    pub fn sanitized(&self) -> Self {
        fn pick(value: Option<f64>, default: f64) -> Option<f64> {
            Some(value.filter(|v| v.is_finite()).unwrap_or(default))
        }
        Self {
            tax_rate: pick(self.tax_rate, DEFAULT_TAX_RATE),
            delivery_base_fee: pick(self.delivery_base_fee, DEFAULT_DELIVERY_BASE_FEE),
            delivery_per_km: pick(self.delivery_per_km, DEFAULT_DELIVERY_PER_KM),
            platform_commission: pick(self.platform_commission, DEFAULT_PLATFORM_COMMISSION),
        }
    }
}

impl Default for FinancialSettings {
    fn default() -> Self {
        Self::empty().sanitized()
    }
}
