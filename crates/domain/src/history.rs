//! History records — append-only entries persisted by the history store.
//!
//! One record type per collection: waterings, moisture readings, disease
//! checks, identifications. Records are immutable once written; queries
//! return them newest first.

use serde::{Deserialize, Serialize};

use crate::diagnosis::{DiseaseStatus, Prediction};
use crate::id::{PlantId, RecordId};
use crate::moisture::MoistureLevel;
use crate::time::{Timestamp, now};

/// Manual or automatic watering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WateringKind {
    Manual,
    Automatic,
}

/// Where a watering record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggeredBy {
    /// The user, through the mobile client.
    MobileApp,
    /// The moisture evaluation on a sensor reading.
    Sensor,
    /// The device reporting a pump run it performed.
    Device,
}

/// Lifecycle of a watering entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WateringStatus {
    /// Command queued, waiting for the device to poll it.
    Queued,
    /// The device reported the pump ran.
    Completed,
}

/// One watering event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WateringRecord {
    pub id: RecordId,
    pub plant_id: PlantId,
    pub kind: WateringKind,
    pub duration_seconds: u32,
    pub triggered_by: TriggeredBy,
    pub status: WateringStatus,
    pub at: Timestamp,
}

impl WateringRecord {
    /// Create a builder for constructing a [`WateringRecord`].
    #[must_use]
    pub fn builder() -> WateringRecordBuilder {
        WateringRecordBuilder::default()
    }
}

/// Step-by-step builder for [`WateringRecord`].
#[derive(Debug, Default)]
pub struct WateringRecordBuilder {
    plant_id: Option<PlantId>,
    kind: Option<WateringKind>,
    duration_seconds: Option<u32>,
    triggered_by: Option<TriggeredBy>,
    status: Option<WateringStatus>,
    at: Option<Timestamp>,
}

impl WateringRecordBuilder {
    #[must_use]
    pub fn plant_id(mut self, plant_id: PlantId) -> Self {
        self.plant_id = Some(plant_id);
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: WateringKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn duration_seconds(mut self, duration_seconds: u32) -> Self {
        self.duration_seconds = Some(duration_seconds);
        self
    }

    #[must_use]
    pub fn triggered_by(mut self, triggered_by: TriggeredBy) -> Self {
        self.triggered_by = Some(triggered_by);
        self
    }

    #[must_use]
    pub fn status(mut self, status: WateringStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn at(mut self, at: Timestamp) -> Self {
        self.at = Some(at);
        self
    }

    /// Consume the builder and return a [`WateringRecord`].
    #[must_use]
    pub fn build(self) -> WateringRecord {
        WateringRecord {
            id: RecordId::new(),
            plant_id: self.plant_id.unwrap_or_default(),
            kind: self.kind.unwrap_or(WateringKind::Manual),
            duration_seconds: self.duration_seconds.unwrap_or(0),
            triggered_by: self.triggered_by.unwrap_or(TriggeredBy::MobileApp),
            status: self.status.unwrap_or(WateringStatus::Queued),
            at: self.at.unwrap_or_else(now),
        }
    }
}

/// One sensor reading, classified at ingestion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoistureRecord {
    pub id: RecordId,
    pub plant_id: PlantId,
    pub moisture_percent: u8,
    pub level: MoistureLevel,
    pub temperature_celsius: Option<f32>,
    pub humidity_percent: Option<u8>,
    pub at: Timestamp,
}

impl MoistureRecord {
    /// Create a record for a classified reading, timestamped now.
    /// Temperature and humidity start out absent.
    #[must_use]
    pub fn new(plant_id: PlantId, moisture_percent: u8, level: MoistureLevel) -> Self {
        Self {
            id: RecordId::new(),
            plant_id,
            moisture_percent,
            level,
            temperature_celsius: None,
            humidity_percent: None,
            at: now(),
        }
    }
}

/// One disease check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub id: RecordId,
    pub plant_id: PlantId,
    pub plant_type: Option<String>,
    pub status: DiseaseStatus,
    pub confidence: f32,
    pub model: String,
    pub at: Timestamp,
}

impl DiseaseRecord {
    /// Create a record for an assessment, timestamped now.
    #[must_use]
    pub fn new(
        plant_id: PlantId,
        plant_type: Option<String>,
        status: DiseaseStatus,
        confidence: f32,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            plant_id,
            plant_type,
            status,
            confidence,
            model: model.into(),
            at: now(),
        }
    }
}

/// One identification run, keeping the full top-5 prediction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentificationRecord {
    pub id: RecordId,
    pub plant_id: PlantId,
    pub predictions: Vec<Prediction>,
    pub model: String,
    pub at: Timestamp,
}

impl IdentificationRecord {
    /// Create a record for a prediction list, timestamped now.
    #[must_use]
    pub fn new(plant_id: PlantId, predictions: Vec<Prediction>, model: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            plant_id,
            predictions,
            model: model.into(),
            at: now(),
        }
    }
}
