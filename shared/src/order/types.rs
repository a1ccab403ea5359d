//! Order record types as stored under `orders/<id>`

use super::OrderStatus;
use crate::util::{lenient_f64, lenient_i64, lenient_list, lenient_opt};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Payment
// ============================================================================

/// How the customer paid
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum PaymentMethod {
    /// Cash on delivery
    #[default]
    #[serde(rename = "COD")]
    CashOnDelivery,
    #[serde(rename = "ONLINE")]
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CashOnDelivery => "COD",
            Self::Online => "ONLINE",
        }
    }
}

// Anything other than ONLINE counts as cash collected on delivery.
impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            Some("ONLINE") => Self::Online,
            _ => Self::CashOnDelivery,
        })
    }
}

// ============================================================================
// Line Items
// ============================================================================

/// Menu item variant (e.g. "Half", "Full")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Variant {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
}

/// One ordered menu item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Menu item reference
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Unit price charged at checkout
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(
        default,
        deserialize_with = "lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_variant: Option<Variant>,
}

impl LineItem {
    /// `price × quantity`; the checkout already folds the variant into `price`
    pub fn line_total(&self) -> f64 {
        self.price.unwrap_or(0.0) * self.quantity as f64
    }
}

// ============================================================================
// Delivery
// ============================================================================

/// Delivery partner denormalized onto the order at assignment time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssignedPartner {
    /// Empty when the assignment was written without an id
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    /// Vehicle plate
    #[serde(default)]
    pub vehicle_number: String,
}

/// Customer ratings left after delivery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderRatings {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub restaurant: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub delivery: Option<f64>,
}

// ============================================================================
// Order
// ============================================================================

/// Customer order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub restaurant_id: String,
    /// Denormalized at checkout, used when the restaurant record is gone
    #[serde(default)]
    pub restaurant_name: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Vec<LineItem>,
    /// Gross amount paid, inclusive of delivery fee and tax
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: OrderStatus,
    /// Unix millis
    #[serde(default, deserialize_with = "lenient_i64")]
    pub created_at: i64,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_partner: Option<AssignedPartner>,
    #[serde(
        default,
        deserialize_with = "lenient_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub ratings: Option<OrderRatings>,
}

impl Order {
    /// Gross amount, 0 when missing or malformed
    pub fn total(&self) -> f64 {
        self.total_amount.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Sum of `price × quantity` over the line items
    pub fn items_subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }
}
