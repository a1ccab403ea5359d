//! Write-side console services
//!
//! Thin async wrappers over a [`RecordStore`](crate::store::RecordStore).
//! Each write checks that the target record exists, applies a partial
//! `update` (or `set` for the settings singleton) and records an audit event.

mod order_service;
mod partner_service;
mod restaurant_service;
mod settings_service;

pub use order_service::OrderService;
pub use partner_service::PartnerService;
pub use restaurant_service::RestaurantService;
pub use settings_service::SettingsService;

use serde_json::{Map, Value};

/// Build a partial-update field map
fn fields<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
