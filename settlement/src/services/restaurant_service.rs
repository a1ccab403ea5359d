//! Restaurant approval, visibility and financial overrides

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use serde_json::{Value, json};
use shared::{Order, RateOverrides, Restaurant};

use super::fields;
use crate::dashboard::{RestaurantDashboard, RestaurantLifetimeStats};
use crate::settlement::DateFilter;
use crate::store::{RecordStore, StorePath};
use crate::utils::{AppError, AppResult, ErrorCode};

pub struct RestaurantService {
    store: Arc<dyn RecordStore>,
}

impl RestaurantService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, restaurant_id: &str) -> AppResult<Restaurant> {
        let path = StorePath::restaurant(restaurant_id)?;
        let mut restaurant: Restaurant = self
            .store
            .fetch_once(&path)
            .await?
            .record()?
            .ok_or_else(|| AppError::restaurant_not_found(restaurant_id))?;
        if restaurant.id.is_empty() {
            restaurant.id = restaurant_id.to_string();
        }
        Ok(restaurant)
    }

    pub async fn list(&self) -> AppResult<Vec<Restaurant>> {
        Ok(self
            .store
            .fetch_once(&StorePath::restaurants())
            .await?
            .records())
    }

    async fn update_existing(
        &self,
        restaurant_id: &str,
        changes: serde_json::Map<String, Value>,
    ) -> AppResult<StorePath> {
        let path = StorePath::restaurant(restaurant_id)?;
        if !self.store.fetch_once(&path).await?.exists() {
            return Err(AppError::restaurant_not_found(restaurant_id));
        }
        self.store.update(&path, changes).await?;
        Ok(path)
    }

    /// Admin approval toggle
    pub async fn set_approved(&self, restaurant_id: &str, approved: bool) -> AppResult<()> {
        let path = self
            .update_existing(restaurant_id, fields([("isApproved", json!(approved))]))
            .await?;
        crate::audit_log!(
            if approved { "restaurant_approve" } else { "restaurant_revoke" },
            path.as_str()
        );
        Ok(())
    }

    pub async fn set_promoted(&self, restaurant_id: &str, promoted: bool) -> AppResult<()> {
        let path = self
            .update_existing(restaurant_id, fields([("promoted", json!(promoted))]))
            .await?;
        crate::audit_log!("restaurant_promote", path.as_str(), promoted);
        Ok(())
    }

    /// Open/closed toggle used by the restaurant itself
    pub async fn set_online(&self, restaurant_id: &str, online: bool) -> AppResult<()> {
        self.update_existing(restaurant_id, fields([("isOnline", json!(online))]))
            .await?;
        tracing::info!(restaurant_id, online, "Restaurant availability changed");
        Ok(())
    }

    /// Write all three overrides. A `None` clears that override so the global
    /// setting applies again.
    pub async fn update_overrides(
        &self,
        restaurant_id: &str,
        overrides: RateOverrides,
    ) -> AppResult<()> {
        for (field, value) in [
            ("customTaxRate", overrides.custom_tax_rate),
            ("customDeliveryFee", overrides.custom_delivery_fee),
            ("commissionRate", overrides.commission_rate),
        ] {
            if let Some(v) = value
                && (!v.is_finite() || v < 0.0)
            {
                return Err(AppError::new(ErrorCode::InvalidRateOverride)
                    .with_detail("field", field)
                    .with_detail("value", v.to_string()));
            }
        }

        let path = self
            .update_existing(
                restaurant_id,
                fields([
                    ("customTaxRate", json!(overrides.custom_tax_rate)),
                    ("customDeliveryFee", json!(overrides.custom_delivery_fee)),
                    ("commissionRate", json!(overrides.commission_rate)),
                ]),
            )
            .await?;
        let details = serde_json::to_string(&overrides)?;
        crate::audit_log!("restaurant_overrides", path.as_str(), details);
        Ok(())
    }

    pub async fn remove(&self, restaurant_id: &str) -> AppResult<()> {
        let path = StorePath::restaurant(restaurant_id)?;
        if !self.store.fetch_once(&path).await?.exists() {
            return Err(AppError::restaurant_not_found(restaurant_id));
        }
        self.store.remove(&path).await?;
        crate::audit_log!("restaurant_remove", path.as_str());
        Ok(())
    }

    async fn orders(&self) -> AppResult<Vec<Order>> {
        Ok(self
            .store
            .fetch_once(&StorePath::orders())
            .await?
            .records())
    }

    /// Order count and gross of non-cancelled orders, all time
    pub async fn lifetime_stats(&self, restaurant_id: &str) -> AppResult<RestaurantLifetimeStats> {
        Ok(RestaurantLifetimeStats::compute(
            restaurant_id,
            &self.orders().await?,
        ))
    }

    pub async fn dashboard<Tz: TimeZone>(
        &self,
        restaurant_id: &str,
        filter: DateFilter,
        now: &DateTime<Tz>,
    ) -> AppResult<RestaurantDashboard> {
        let restaurant = self.get(restaurant_id).await?;
        let orders = self.orders().await?;
        Ok(RestaurantDashboard::compute(&restaurant, &orders, filter, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::FixedOffset;

    fn service() -> (Arc<MemoryStore>, RestaurantService) {
        let store = Arc::new(MemoryStore::from_value(json!({
            "restaurants": {
                "r1": {
                    "name": "Spice Hub", "isApproved": false, "customTaxRate": 12, "rating": 4.2
                }
            },
            "orders": {
                "o1": {
                    "restaurantId": "r1", "totalAmount": 300, "status": "DELIVERED", "createdAt": 1,
                    "items": [{ "price": 100, "quantity": 2 }]
                },
                "o2": {
                    "restaurantId": "r1", "totalAmount": 100, "status": "CANCELLED", "createdAt": 2
                }
            }
        })));
        (store.clone(), RestaurantService::new(store))
    }

    #[tokio::test]
    async fn test_toggles() {
        let (_store, svc) = service();
        svc.set_approved("r1", true).await.unwrap();
        svc.set_promoted("r1", true).await.unwrap();
        svc.set_online("r1", true).await.unwrap();

        let r = svc.get("r1").await.unwrap();
        assert_eq!(r.id, "r1");
        assert!(r.is_approved && r.promoted && r.is_online);
        assert_eq!(r.name, "Spice Hub");
    }

    #[tokio::test]
    async fn test_unknown_restaurant() {
        let (store, svc) = service();
        let err = svc.set_approved("r9", true).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);
        // No partial record created
        assert!(!store.fetch_once(&StorePath::restaurant("r9").unwrap()).await.unwrap().exists());
    }

    #[tokio::test]
    async fn test_overrides_set_and_clear() {
        let (store, svc) = service();
        svc.update_overrides(
            "r1",
            RateOverrides {
                custom_tax_rate: None,
                custom_delivery_fee: Some(25.0),
                commission_rate: Some(15.0),
            },
        )
        .await
        .unwrap();

        let r = svc.get("r1").await.unwrap();
        assert_eq!(r.custom_tax_rate, None);
        assert_eq!(r.custom_delivery_fee, Some(25.0));
        assert_eq!(r.commission_rate, Some(15.0));

        let raw = store.fetch_once(&StorePath::restaurant("r1").unwrap()).await.unwrap();
        assert!(raw.value().unwrap().get("customTaxRate").is_none());
    }

    #[tokio::test]
    async fn test_overrides_reject_negative() {
        let (_store, svc) = service();
        let err = svc
            .update_overrides(
                "r1",
                RateOverrides {
                    commission_rate: Some(-1.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRateOverride);
        assert_eq!(svc.get("r1").await.unwrap().custom_tax_rate, Some(12.0));
    }

    #[tokio::test]
    async fn test_stats_dashboard_and_remove() {
        let (_store, svc) = service();

        let stats = svc.lifetime_stats("r1").await.unwrap();
        assert_eq!(stats.order_count, 1);
        assert_eq!(stats.revenue, 300.0);

        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
            .unwrap();
        let dash = svc.dashboard("r1", DateFilter::AllTime, &now).await.unwrap();
        assert_eq!(dash.order_count, 1);
        assert!((dash.net_income - 180.0).abs() < 1e-9);
        assert_eq!(dash.rating, Some(4.2));

        svc.remove("r1").await.unwrap();
        assert_eq!(svc.get("r1").await.unwrap_err().code, ErrorCode::RestaurantNotFound);
        assert_eq!(svc.remove("r1").await.unwrap_err().code, ErrorCode::RestaurantNotFound);
    }
}
