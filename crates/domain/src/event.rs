//! Event — an immutable record of something that happened.
//!
//! Events are published on the in-process bus when commands are queued or
//! delivered, readings arrive, the pump reports, or a disease check runs.
//! Subscribers (currently the notification worker) react to them; services
//! never wait for subscribers.

use serde::{Deserialize, Serialize};

use crate::command::PendingCommand;
use crate::diagnosis::DiseaseStatus;
use crate::id::{EventId, PlantId};
use crate::moisture::MoistureLevel;
use crate::time::{Timestamp, now};

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A watering command entered the coordinator.
    WateringQueued { command: PendingCommand },
    /// The device polled a command away; the pump is about to run.
    WateringDelivered { command: PendingCommand },
    /// The device reported its pump state.
    PumpReported { plant_id: PlantId, active: bool },
    /// A sensor reading was ingested and classified.
    MoistureMeasured {
        plant_id: PlantId,
        moisture_percent: u8,
        level: MoistureLevel,
        /// Whether the plant's profile allows moisture alerts, resolved at
        /// measurement time.
        notifications_enabled: bool,
    },
    /// A disease check finished.
    DiseaseChecked {
        plant_id: PlantId,
        status: DiseaseStatus,
        confidence: f32,
    },
}

/// A timestamped, identified occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub at: Timestamp,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Wrap a kind with a fresh id and the current time.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            at: now(),
            kind,
        }
    }

    /// The plant this event concerns.
    #[must_use]
    pub fn plant_id(&self) -> &PlantId {
        match &self.kind {
            EventKind::WateringQueued { command } | EventKind::WateringDelivered { command } => {
                &command.plant_id
            }
            EventKind::PumpReported { plant_id, .. }
            | EventKind::MoistureMeasured { plant_id, .. }
            | EventKind::DiseaseChecked { plant_id, .. } => plant_id,
        }
    }
}
