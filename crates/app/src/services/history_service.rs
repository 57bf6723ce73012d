//! History service — read-side queries over the history store.

use chrono::Duration;

use sprout_domain::error::SproutError;
use sprout_domain::history::{DiseaseRecord, MoistureRecord, WateringRecord};
use sprout_domain::id::PlantId;
use sprout_domain::time::now;

use crate::ports::HistoryStore;

/// Application service for the mobile client's history screens.
pub struct HistoryService<HS> {
    history: HS,
}

impl<HS: HistoryStore> HistoryService<HS> {
    /// Create a new service backed by the given store.
    pub fn new(history: HS) -> Self {
        Self { history }
    }

    /// Watering records for a plant, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn waterings(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> Result<Vec<WateringRecord>, SproutError> {
        self.history.watering_history(plant_id, limit).await
    }

    /// Moisture records for a plant over the last `days` days, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn moisture(
        &self,
        plant_id: PlantId,
        limit: usize,
        days: i64,
    ) -> Result<Vec<MoistureRecord>, SproutError> {
        let since = now() - Duration::days(days);
        self.history.moisture_history(plant_id, limit, since).await
    }

    /// Disease-check records for a plant, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn diseases(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> Result<Vec<DiseaseRecord>, SproutError> {
        self.history.disease_history(plant_id, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HistoryStore as _;
    use crate::services::tests::InMemoryHistory;
    use sprout_domain::moisture::MoistureLevel;
    use std::sync::Arc;

    #[tokio::test]
    async fn should_return_waterings_newest_first() {
        let store = Arc::new(InMemoryHistory::default());
        let first = WateringRecord::builder().duration_seconds(1).build();
        let second = WateringRecord::builder().duration_seconds(2).build();
        store.record_watering(first).await.unwrap();
        store.record_watering(second).await.unwrap();

        let svc = HistoryService::new(Arc::clone(&store));
        let records = svc.waterings(PlantId::main(), 10).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].duration_seconds, 2);
    }

    #[tokio::test]
    async fn should_apply_limit() {
        let store = Arc::new(InMemoryHistory::default());
        for duration in 1..=5 {
            store
                .record_watering(WateringRecord::builder().duration_seconds(duration).build())
                .await
                .unwrap();
        }

        let svc = HistoryService::new(store);
        let records = svc.waterings(PlantId::main(), 2).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].duration_seconds, 5);
    }

    #[tokio::test]
    async fn should_window_moisture_history_by_days() {
        let store = Arc::new(InMemoryHistory::default());
        let mut old = MoistureRecord::new(PlantId::main(), 40, MoistureLevel::Normal);
        old.at = now() - Duration::days(30);
        let fresh = MoistureRecord::new(PlantId::main(), 35, MoistureLevel::Normal);
        store.record_moisture(old).await.unwrap();
        store.record_moisture(fresh).await.unwrap();

        let svc = HistoryService::new(store);
        let records = svc.moisture(PlantId::main(), 100, 7).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].moisture_percent, 35);
    }

    #[tokio::test]
    async fn should_return_empty_disease_history_for_unknown_plant() {
        let svc = HistoryService::new(Arc::new(InMemoryHistory::default()));
        let records = svc
            .diseases(PlantId::new("balcony").unwrap(), 10)
            .await
            .unwrap();
        assert!(records.is_empty());
    }
}
