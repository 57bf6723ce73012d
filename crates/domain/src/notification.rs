//! Notifications — user-facing alerts derived from events.
//!
//! Delivery to a push channel is out of scope; the notification worker keeps
//! a bounded history and logs each entry.

use serde::{Deserialize, Serialize};

use crate::id::{PlantId, RecordId};
use crate::time::{Timestamp, now};

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    MoistureAlert,
    WateringDone,
    DiseaseAlert,
}

/// Urgency shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Normal,
    High,
}

/// One notification as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: RecordId,
    pub plant_id: PlantId,
    pub kind: NotificationKind,
    pub priority: Priority,
    pub title: String,
    pub message: String,
    pub at: Timestamp,
}

impl Notification {
    /// Create a notification timestamped now.
    #[must_use]
    pub fn new(
        plant_id: PlantId,
        kind: NotificationKind,
        priority: Priority,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            plant_id,
            kind,
            priority,
            title: title.into(),
            message: message.into(),
            at: now(),
        }
    }
}
