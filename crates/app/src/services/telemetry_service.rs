//! Telemetry service — sensor-reading ingestion and the auto-watering
//! decision.

use std::sync::Arc;

use sprout_domain::command::{CommandSource, PendingCommand};
use sprout_domain::error::{SproutError, ValidationError};
use sprout_domain::event::{Event, EventKind};
use sprout_domain::history::{
    MoistureRecord, TriggeredBy, WateringKind, WateringRecord, WateringStatus,
};
use sprout_domain::id::PlantId;
use sprout_domain::moisture::{CRITICAL_MOISTURE_THRESHOLD, MoistureLevel};

use crate::coordinator::WateringCoordinator;
use crate::ports::{EventPublisher, HistoryStore, ProfileRepository};
use crate::services::settings_or_default;

/// One reading as reported by the device.
#[derive(Debug, Clone)]
pub struct SensorReading {
    pub plant_id: PlantId,
    pub moisture_percent: u8,
    pub temperature_celsius: Option<f32>,
    pub humidity_percent: Option<u8>,
}

/// What ingestion decided about a reading.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub level: MoistureLevel,
    /// The automatic command raised by this reading, if the decision fired.
    pub queued: Option<PendingCommand>,
}

/// Application service for the device's sensor feed: classifies readings,
/// appends history, and raises automatic watering commands.
pub struct TelemetryService<PR, HS, EP> {
    coordinator: Arc<WateringCoordinator>,
    profiles: PR,
    history: HS,
    events: EP,
}

impl<PR, HS, EP> TelemetryService<PR, HS, EP>
where
    PR: ProfileRepository,
    HS: HistoryStore,
    EP: EventPublisher,
{
    /// Create a new service sharing the given coordinator.
    pub fn new(coordinator: Arc<WateringCoordinator>, profiles: PR, history: HS, events: EP) -> Self {
        Self {
            coordinator,
            profiles,
            history,
            events,
        }
    }

    /// Ingest one reading.
    ///
    /// Resolves the plant's settings (defaults when no profile exists),
    /// classifies the moisture value, appends a moisture record, publishes
    /// [`EventKind::MoistureMeasured`], and queues an automatic watering
    /// command when the decision fires.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Validation`] for a moisture value above 100.
    /// Store and bus faults are absorbed — a dead history sink must not
    /// break the device feed or the watering decision.
    pub async fn ingest(&self, reading: SensorReading) -> Result<IngestOutcome, SproutError> {
        if reading.moisture_percent > 100 {
            return Err(ValidationError::MoistureOutOfRange(reading.moisture_percent).into());
        }

        let plant_id = reading.plant_id.clone();
        let settings = settings_or_default(&self.profiles, &plant_id).await;
        let level = MoistureLevel::classify(
            reading.moisture_percent,
            settings.moisture_threshold,
            CRITICAL_MOISTURE_THRESHOLD,
        );
        tracing::info!(
            plant_id = %plant_id,
            moisture = reading.moisture_percent,
            threshold = settings.moisture_threshold,
            level = level.as_str(),
            "sensor reading ingested"
        );

        let mut record = MoistureRecord::new(plant_id.clone(), reading.moisture_percent, level);
        record.temperature_celsius = reading.temperature_celsius;
        record.humidity_percent = reading.humidity_percent;
        if let Err(err) = self.history.record_moisture(record).await {
            tracing::warn!(error = %err, "failed to append moisture history");
        }

        self.publish(EventKind::MoistureMeasured {
            plant_id: plant_id.clone(),
            moisture_percent: reading.moisture_percent,
            level,
            notifications_enabled: settings.notification_enabled,
        })
        .await;

        let queued = if WateringCoordinator::should_auto_water(
            reading.moisture_percent,
            settings.moisture_threshold,
            settings.auto_watering,
        ) {
            Some(self.queue_auto(plant_id, settings.watering_duration).await?)
        } else {
            None
        };

        Ok(IngestOutcome { level, queued })
    }

    async fn queue_auto(
        &self,
        plant_id: PlantId,
        duration_seconds: u32,
    ) -> Result<PendingCommand, SproutError> {
        let command = PendingCommand::builder()
            .plant_id(plant_id.clone())
            .duration_seconds(duration_seconds)
            .source(CommandSource::Automatic)
            .build()?;

        if let Some(dropped) = self.coordinator.queue(command.clone()) {
            tracing::warn!(
                plant_id = %plant_id,
                dropped_duration = dropped.duration_seconds,
                "replacing unconsumed watering command"
            );
        }
        tracing::info!(
            plant_id = %plant_id,
            duration = duration_seconds,
            "automatic watering command queued"
        );

        if let Err(err) = self
            .history
            .record_watering(
                WateringRecord::builder()
                    .plant_id(plant_id)
                    .kind(WateringKind::Automatic)
                    .duration_seconds(duration_seconds)
                    .triggered_by(TriggeredBy::Sensor)
                    .status(WateringStatus::Queued)
                    .build(),
            )
            .await
        {
            tracing::warn!(error = %err, "failed to append watering history");
        }
        self.publish(EventKind::WateringQueued {
            command: command.clone(),
        })
        .await;

        Ok(command)
    }

    async fn publish(&self, kind: EventKind) {
        if let Err(err) = self.events.publish(Event::new(kind)).await {
            tracing::debug!(error = %err, "event publish failed");
        }
    }
}
