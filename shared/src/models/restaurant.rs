//! Restaurant Model

use crate::util::lenient_f64;
use serde::{Deserialize, Serialize};

/// Per-restaurant financial overrides.
///
/// `None` means "use the platform default" for that rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOverrides {
    /// Tax rate in percent
    #[serde(default, deserialize_with = "lenient_f64")]
    pub custom_tax_rate: Option<f64>,
    /// Flat delivery fee in currency units
    #[serde(default, deserialize_with = "lenient_f64")]
    pub custom_delivery_fee: Option<f64>,
    /// Platform commission in percent
    #[serde(default, deserialize_with = "lenient_f64")]
    pub commission_rate: Option<f64>,
}

impl RateOverrides {
    pub fn is_empty(&self) -> bool {
        self.custom_tax_rate.is_none()
            && self.custom_delivery_fee.is_none()
            && self.commission_rate.is_none()
    }
}

/// Restaurant entity as stored under `restaurants/<id>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Partner login email
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lng: Option<f64>,
    /// Settlement UPI handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
    /// Toggled by the restaurant (open/closed)
    #[serde(default)]
    pub is_online: bool,
    /// Toggled by the admin
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub promoted: bool,

    // -- Financial overrides --
    #[serde(default, deserialize_with = "lenient_f64")]
    pub custom_tax_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub custom_delivery_fee: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub commission_rate: Option<f64>,
}

impl Restaurant {
    pub fn overrides(&self) -> RateOverrides {
        RateOverrides {
            custom_tax_rate: self.custom_tax_rate,
            custom_delivery_fee: self.custom_delivery_fee,
            commission_rate: self.commission_rate,
        }
    }

    /// Map location, when both coordinates are set
    pub fn location(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lng)
    }
}
