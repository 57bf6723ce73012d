//! Shared in-memory port implementations for service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use sprout_domain::error::SproutError;
use sprout_domain::history::{
    DiseaseRecord, IdentificationRecord, MoistureRecord, WateringRecord,
};
use sprout_domain::id::PlantId;
use sprout_domain::profile::PlantProfile;
use sprout_domain::time::Timestamp;

use crate::ports::{HistoryStore, ProfileRepository};

/// Profile repository over a plain map.
#[derive(Default)]
pub(crate) struct InMemoryProfiles {
    store: Mutex<HashMap<PlantId, PlantProfile>>,
}

impl InMemoryProfiles {
    /// Seed a profile directly, bypassing the service layer.
    pub(crate) async fn insert(&self, profile: PlantProfile) {
        self.store
            .lock()
            .unwrap()
            .insert(profile.plant_id.clone(), profile);
    }
}

impl ProfileRepository for InMemoryProfiles {
    fn get(
        &self,
        plant_id: PlantId,
    ) -> impl Future<Output = Result<Option<PlantProfile>, SproutError>> + Send {
        let result = self.store.lock().unwrap().get(&plant_id).cloned();
        async { Ok(result) }
    }

    fn upsert(
        &self,
        profile: PlantProfile,
    ) -> impl Future<Output = Result<PlantProfile, SproutError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(profile.plant_id.clone(), profile.clone());
        async { Ok(profile) }
    }
}

/// History store over plain vectors, newest last in storage, newest first
/// out of queries.
#[derive(Default)]
pub(crate) struct InMemoryHistory {
    pub(crate) waterings: Mutex<Vec<WateringRecord>>,
    pub(crate) moistures: Mutex<Vec<MoistureRecord>>,
    pub(crate) diseases: Mutex<Vec<DiseaseRecord>>,
    pub(crate) identifications: Mutex<Vec<IdentificationRecord>>,
}

impl HistoryStore for InMemoryHistory {
    fn record_watering(
        &self,
        record: WateringRecord,
    ) -> impl Future<Output = Result<WateringRecord, SproutError>> + Send {
        self.waterings.lock().unwrap().push(record.clone());
        async { Ok(record) }
    }

    fn record_moisture(
        &self,
        record: MoistureRecord,
    ) -> impl Future<Output = Result<MoistureRecord, SproutError>> + Send {
        self.moistures.lock().unwrap().push(record.clone());
        async { Ok(record) }
    }

    fn record_disease(
        &self,
        record: DiseaseRecord,
    ) -> impl Future<Output = Result<DiseaseRecord, SproutError>> + Send {
        self.diseases.lock().unwrap().push(record.clone());
        async { Ok(record) }
    }

    fn record_identification(
        &self,
        record: IdentificationRecord,
    ) -> impl Future<Output = Result<IdentificationRecord, SproutError>> + Send {
        self.identifications.lock().unwrap().push(record.clone());
        async { Ok(record) }
    }

    fn watering_history(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<WateringRecord>, SproutError>> + Send {
        let result: Vec<_> = self
            .waterings
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|record| record.plant_id == plant_id)
            .take(limit)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn moisture_history(
        &self,
        plant_id: PlantId,
        limit: usize,
        since: Timestamp,
    ) -> impl Future<Output = Result<Vec<MoistureRecord>, SproutError>> + Send {
        let result: Vec<_> = self
            .moistures
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|record| record.plant_id == plant_id && record.at >= since)
            .take(limit)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn disease_history(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<DiseaseRecord>, SproutError>> + Send {
        let result: Vec<_> = self
            .diseases
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|record| record.plant_id == plant_id)
            .take(limit)
            .cloned()
            .collect();
        async { Ok(result) }
    }
}

/// History store whose appends always fail, for fire-and-forget tests.
#[derive(Default)]
pub(crate) struct FailingHistory;

fn storage_error() -> SproutError {
    SproutError::Storage("history store unreachable".into())
}

impl HistoryStore for FailingHistory {
    fn record_watering(
        &self,
        _record: WateringRecord,
    ) -> impl Future<Output = Result<WateringRecord, SproutError>> + Send {
        async { Err(storage_error()) }
    }

    fn record_moisture(
        &self,
        _record: MoistureRecord,
    ) -> impl Future<Output = Result<MoistureRecord, SproutError>> + Send {
        async { Err(storage_error()) }
    }

    fn record_disease(
        &self,
        _record: DiseaseRecord,
    ) -> impl Future<Output = Result<DiseaseRecord, SproutError>> + Send {
        async { Err(storage_error()) }
    }

    fn record_identification(
        &self,
        _record: IdentificationRecord,
    ) -> impl Future<Output = Result<IdentificationRecord, SproutError>> + Send {
        async { Err(storage_error()) }
    }

    fn watering_history(
        &self,
        _plant_id: PlantId,
        _limit: usize,
    ) -> impl Future<Output = Result<Vec<WateringRecord>, SproutError>> + Send {
        async { Err(storage_error()) }
    }

    fn moisture_history(
        &self,
        _plant_id: PlantId,
        _limit: usize,
        _since: Timestamp,
    ) -> impl Future<Output = Result<Vec<MoistureRecord>, SproutError>> + Send {
        async { Err(storage_error()) }
    }

    fn disease_history(
        &self,
        _plant_id: PlantId,
        _limit: usize,
    ) -> impl Future<Output = Result<Vec<DiseaseRecord>, SproutError>> + Send {
        async { Err(storage_error()) }
    }
}
