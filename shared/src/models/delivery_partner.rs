//! Delivery Partner Model (`deliveryPartners/<id>`)

use crate::util::lenient_i64;
use serde::{Deserialize, Serialize};

/// Registered delivery partner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPartner {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub vehicle_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Toggled by the admin
    #[serde(default)]
    pub is_approved: bool,
    /// Unix millis
    #[serde(default, deserialize_with = "lenient_i64")]
    pub joined_at: i64,
}
