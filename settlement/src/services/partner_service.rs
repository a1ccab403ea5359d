//! Delivery partner approval and removal

use std::sync::Arc;

use serde_json::json;
use shared::DeliveryPartner;

use super::fields;
use crate::store::{RecordStore, StorePath};
use crate::utils::{AppError, AppResult};

pub struct PartnerService {
    store: Arc<dyn RecordStore>,
}

impl PartnerService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Registered partners, newest first
    pub async fn list(&self) -> AppResult<Vec<DeliveryPartner>> {
        let mut partners: Vec<DeliveryPartner> = self
            .store
            .fetch_once(&StorePath::delivery_partners())
            .await?
            .records();
        partners.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));
        Ok(partners)
    }

    async fn existing(&self, partner_id: &str) -> AppResult<StorePath> {
        let path = StorePath::delivery_partner(partner_id)?;
        if !self.store.fetch_once(&path).await?.exists() {
            return Err(AppError::partner_not_found(partner_id));
        }
        Ok(path)
    }

    pub async fn set_approved(&self, partner_id: &str, approved: bool) -> AppResult<()> {
        let path = self.existing(partner_id).await?;
        self.store
            .update(&path, fields([("isApproved", json!(approved))]))
            .await?;
        crate::audit_log!(
            if approved { "partner_approve" } else { "partner_revoke" },
            path.as_str()
        );
        Ok(())
    }

    pub async fn remove(&self, partner_id: &str) -> AppResult<()> {
        let path = self.existing(partner_id).await?;
        self.store.remove(&path).await?;
        crate::audit_log!("partner_remove", path.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::utils::ErrorCode;

    fn service() -> PartnerService {
        PartnerService::new(Arc::new(MemoryStore::from_value(json!({
            "deliveryPartners": {
                "p1": { "name": "Ravi", "isApproved": false, "joinedAt": 100 },
                "p2": { "name": "Asha", "isApproved": true, "joinedAt": 200 }
            }
        }))))
    }

    #[tokio::test]
    async fn test_approve_and_remove() {
        let svc = service();
        svc.set_approved("p1", true).await.unwrap();

        let partners = svc.list().await.unwrap();
        assert_eq!(partners[0].id, "p2");
        assert!(partners.iter().all(|p| p.is_approved));

        svc.remove("p2").await.unwrap();
        let partners = svc.list().await.unwrap();
        assert_eq!(partners.len(), 1);
        assert_eq!(partners[0].name, "Ravi");
    }

    #[tokio::test]
    async fn test_unknown_partner() {
        let svc = service();
        assert_eq!(
            svc.set_approved("p9", true).await.unwrap_err().code,
            ErrorCode::PartnerNotFound
        );
        assert_eq!(svc.remove("p9").await.unwrap_err().code, ErrorCode::PartnerNotFound);
    }
}
