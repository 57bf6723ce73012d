//! # sprout-adapter-memory
//!
//! In-process implementations of the storage ports.
//!
//! Used in two places: as the storage backend when sproutd runs without a
//! configured remote store (the development "mock mode"), and in tests.
//! Everything lives behind a mutex; nothing survives a restart.
//!
//! ## Dependency rule
//! Depends on `sprout-app` (port traits) and `sprout-domain` only.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use sprout_app::ports::{HistoryStore, ProfileRepository};
use sprout_domain::error::SproutError;
use sprout_domain::history::{
    DiseaseRecord, IdentificationRecord, MoistureRecord, WateringRecord,
};
use sprout_domain::id::PlantId;
use sprout_domain::profile::PlantProfile;
use sprout_domain::time::Timestamp;

/// Records kept per collection before the oldest are dropped.
const HISTORY_CAPACITY: usize = 1000;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Profile store over a plain map.
#[derive(Debug, Default)]
pub struct MemoryProfileRepository {
    profiles: Mutex<HashMap<PlantId, PlantProfile>>,
}

impl MemoryProfileRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileRepository for MemoryProfileRepository {
    fn get(
        &self,
        plant_id: PlantId,
    ) -> impl Future<Output = Result<Option<PlantProfile>, SproutError>> + Send {
        let result = lock(&self.profiles).get(&plant_id).cloned();
        async { Ok(result) }
    }

    fn upsert(
        &self,
        profile: PlantProfile,
    ) -> impl Future<Output = Result<PlantProfile, SproutError>> + Send {
        lock(&self.profiles).insert(profile.plant_id.clone(), profile.clone());
        async { Ok(profile) }
    }
}

/// Bounded append-only history over vectors, newest at the back.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    waterings: Mutex<Vec<WateringRecord>>,
    moistures: Mutex<Vec<MoistureRecord>>,
    diseases: Mutex<Vec<DiseaseRecord>>,
    identifications: Mutex<Vec<IdentificationRecord>>,
}

impl MemoryHistoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn append<T>(collection: &Mutex<Vec<T>>, record: T) {
        let mut records = lock(collection);
        if records.len() == HISTORY_CAPACITY {
            records.remove(0);
        }
        records.push(record);
    }

    fn query<T, F>(collection: &Mutex<Vec<T>>, limit: usize, matches: F) -> Vec<T>
    where
        T: Clone,
        F: Fn(&T) -> bool,
    {
        lock(collection)
            .iter()
            .rev()
            .filter(|record| matches(record))
            .take(limit)
            .cloned()
            .collect()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn record_watering(
        &self,
        record: WateringRecord,
    ) -> impl Future<Output = Result<WateringRecord, SproutError>> + Send {
        Self::append(&self.waterings, record.clone());
        async { Ok(record) }
    }

    fn record_moisture(
        &self,
        record: MoistureRecord,
    ) -> impl Future<Output = Result<MoistureRecord, SproutError>> + Send {
        Self::append(&self.moistures, record.clone());
        async { Ok(record) }
    }

    fn record_disease(
        &self,
        record: DiseaseRecord,
    ) -> impl Future<Output = Result<DiseaseRecord, SproutError>> + Send {
        Self::append(&self.diseases, record.clone());
        async { Ok(record) }
    }

    fn record_identification(
        &self,
        record: IdentificationRecord,
    ) -> impl Future<Output = Result<IdentificationRecord, SproutError>> + Send {
        Self::append(&self.identifications, record.clone());
        async { Ok(record) }
    }

    fn watering_history(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<WateringRecord>, SproutError>> + Send {
        let result = Self::query(&self.waterings, limit, |record| record.plant_id == plant_id);
        async { Ok(result) }
    }

    fn moisture_history(
        &self,
        plant_id: PlantId,
        limit: usize,
        since: Timestamp,
    ) -> impl Future<Output = Result<Vec<MoistureRecord>, SproutError>> + Send {
        let result = Self::query(&self.moistures, limit, |record| {
            record.plant_id == plant_id && record.at >= since
        });
        async { Ok(result) }
    }

    fn disease_history(
        &self,
        plant_id: PlantId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<DiseaseRecord>, SproutError>> + Send {
        let result = Self::query(&self.diseases, limit, |record| record.plant_id == plant_id);
        async { Ok(result) }
    }
}
