//! History sink port — append-only telemetry and diagnosis records.

use std::future::Future;
use std::sync::Arc;

use sprout_domain::error::SproutError;
use sprout_domain::history::{
    DiseaseRecord, IdentificationRecord, MoistureRecord, WateringRecord,
};
use sprout_domain::id::PlantId;
use sprout_domain::time::Timestamp;

/// Append-only store for history records, queried newest first.
///
/// Writes on telemetry paths are fire-and-forget from the caller's point of
/// view: a failed append is logged and must never fail the device protocol
/// or touch coordinator state.
pub trait HistoryStore {
    /// Append a watering record.
    fn record_watering(
        &self,
        record: WateringRecord,
    ) -> impl Future<Output = Result<WateringRecord, SproutError>> + Send;

    /// Append a moisture record.
    fn record_moisture(
        &self,
        record: MoistureRecord,
    ) -> impl Future<Output = Result<MoistureRecord, SproutError>> + Send;

    /// Append a disease-check record.
    fn record_disease(
        &self,
        record: DiseaseRecord,
    ) -> impl Future<Output = Result<DiseaseRecord, SproutError>> + Send;

    /// Append an identification record.
    fn record_identification(
        &self,
        record: IdentificationRecord,
    ) -> impl Future<Output = Result<IdentificationRecord, SproutError>> + Send;

    /// Watering records for a plant, newest first.
    fn watering_history(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<WateringRecord>, SproutError>> + Send;

    /// Moisture records for a plant since the given time, newest first.
    fn moisture_history(
        &self,
        plant_id: PlantId,
        limit: usize,
        since: Timestamp,
    ) -> impl Future<Output = Result<Vec<MoistureRecord>, SproutError>> + Send;

    /// Disease-check records for a plant, newest first.
    fn disease_history(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<DiseaseRecord>, SproutError>> + Send;
}

impl<T: HistoryStore + Send + Sync> HistoryStore for Arc<T> {
    fn record_watering(
        &self,
        record: WateringRecord,
    ) -> impl Future<Output = Result<WateringRecord, SproutError>> + Send {
        (**self).record_watering(record)
    }

    fn record_moisture(
        &self,
        record: MoistureRecord,
    ) -> impl Future<Output = Result<MoistureRecord, SproutError>> + Send {
        (**self).record_moisture(record)
    }

    fn record_disease(
        &self,
        record: DiseaseRecord,
    ) -> impl Future<Output = Result<DiseaseRecord, SproutError>> + Send {
        (**self).record_disease(record)
    }

    fn record_identification(
        &self,
        record: IdentificationRecord,
    ) -> impl Future<Output = Result<IdentificationRecord, SproutError>> + Send {
        (**self).record_identification(record)
    }

    fn watering_history(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<WateringRecord>, SproutError>> + Send {
        (**self).watering_history(plant_id, limit)
    }

    fn moisture_history(
        &self,
        plant_id: PlantId,
        limit: usize,
        since: Timestamp,
    ) -> impl Future<Output = Result<Vec<MoistureRecord>, SproutError>> + Send {
        (**self).moisture_history(plant_id, limit, since)
    }

    fn disease_history(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<DiseaseRecord>, SproutError>> + Send {
        (**self).disease_history(plant_id, limit)
    }
}
