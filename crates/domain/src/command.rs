//! Watering commands — pump actions queued for one-time delivery.
//!
//! A [`PendingCommand`] is created by a manual trigger or by the automatic
//! watering decision and lives in the coordinator's in-memory map until the
//! device polls it away. At most one exists per plant; a newer command
//! replaces an older one.

use serde::{Deserialize, Serialize};

use crate::error::{SproutError, ValidationError};
use crate::id::PlantId;
use crate::time::Timestamp;

/// Who raised a watering command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandSource {
    /// Requested by the user through the mobile client.
    Manual,
    /// Raised by the moisture evaluation without user involvement.
    Automatic,
}

impl CommandSource {
    /// Stable lowercase label used in records and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "automatic",
        }
    }
}

/// A watering request not yet delivered to the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCommand {
    pub plant_id: PlantId,
    /// Requested pump-on time, in whole seconds. Always greater than zero.
    pub duration_seconds: u32,
    pub source: CommandSource,
    pub created_at: Timestamp,
}

impl PendingCommand {
    /// Create a builder for constructing a [`PendingCommand`].
    #[must_use]
    pub fn builder() -> PendingCommandBuilder {
        PendingCommandBuilder::default()
    }
}

/// Step-by-step builder for [`PendingCommand`].
#[derive(Debug, Default)]
pub struct PendingCommandBuilder {
    plant_id: Option<PlantId>,
    duration_seconds: Option<u32>,
    source: Option<CommandSource>,
    created_at: Option<Timestamp>,
}

impl PendingCommandBuilder {
    #[must_use]
    pub fn plant_id(mut self, plant_id: PlantId) -> Self {
        self.plant_id = Some(plant_id);
        self
    }

    #[must_use]
    pub fn duration_seconds(mut self, duration_seconds: u32) -> Self {
        self.duration_seconds = Some(duration_seconds);
        self
    }

    #[must_use]
    pub fn source(mut self, source: CommandSource) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`PendingCommand`].
    ///
    /// `created_at` defaults to the current time.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Validation`] when `duration_seconds` is zero
    /// or missing. Validation happens here, before the command can reach the
    /// coordinator, so no partial state is ever queued.
    pub fn build(self) -> Result<PendingCommand, SproutError> {
        let duration_seconds = self.duration_seconds.unwrap_or(0);
        if duration_seconds == 0 {
            return Err(ValidationError::ZeroDuration.into());
        }
        Ok(PendingCommand {
            plant_id: self.plant_id.unwrap_or_default(),
            duration_seconds,
            source: self.source.unwrap_or(CommandSource::Manual),
            created_at: self.created_at.unwrap_or_else(crate::time::now),
        })
    }
}
