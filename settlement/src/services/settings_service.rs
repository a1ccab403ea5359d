//! Global financial settings (`adminSettings`)

use std::sync::Arc;

use shared::FinancialSettings;

use crate::store::{RecordStore, StorePath};
use crate::utils::{AppError, AppResult, ErrorCode};

pub struct SettingsService {
    store: Arc<dyn RecordStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Stored record with missing fields filled from defaults
    pub async fn load(&self) -> AppResult<FinancialSettings> {
        let snapshot = self.store.fetch_once(&StorePath::admin_settings()).await?;
        Ok(snapshot
            .record::<FinancialSettings>()?
            .map(|s| s.sanitized())
            .unwrap_or_default())
    }

    /// Replace the record. Non-numeric fields fall back to defaults; negative
    /// values are rejected.
    pub async fn save(&self, settings: FinancialSettings) -> AppResult<FinancialSettings> {
        let safe = settings.sanitized();
        for (field, value) in [
            ("taxRate", safe.tax_rate),
            ("deliveryBaseFee", safe.delivery_base_fee),
            ("deliveryPerKm", safe.delivery_per_km),
            ("platformCommission", safe.platform_commission),
        ] {
            if value.is_some_and(|v| v < 0.0) {
                return Err(AppError::new(ErrorCode::SettingsInvalid)
                    .with_detail("field", field)
                    .with_detail("value", value.unwrap_or_default()));
            }
        }

        let path = StorePath::admin_settings();
        self.store.set(&path, serde_json::to_value(safe)?).await?;
        let details = serde_json::to_string(&safe)?;
        crate::audit_log!("settings_save", path.as_str(), details);
        Ok(safe)
    }
}
