//! Watering service — manual triggers, device polling, pump reports.

use std::sync::Arc;

use sprout_domain::command::{CommandSource, PendingCommand};
use sprout_domain::error::SproutError;
use sprout_domain::event::{Event, EventKind};
use sprout_domain::history::{TriggeredBy, WateringKind, WateringRecord, WateringStatus};
use sprout_domain::id::PlantId;
use sprout_domain::profile::DEFAULT_WATERING_DURATION;

use crate::coordinator::WateringCoordinator;
use crate::ports::{EventPublisher, HistoryStore, ProfileRepository};
use crate::services::settings_or_default;

/// Application service around the watering coordinator: queues manual
/// commands, answers device polls, and records pump reports.
pub struct WateringService<PR, HS, EP> {
    coordinator: Arc<WateringCoordinator>,
    profiles: PR,
    history: HS,
    events: EP,
}

impl<PR, HS, EP> WateringService<PR, HS, EP>
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

    /// Queue a manual watering command.
    ///
    /// When the request does not name a duration, the plant's configured
    /// `watering_duration` applies. The command replaces any not-yet-polled
    /// predecessor (latest request wins); the displaced command is logged.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Validation`] for a zero duration. History and
    /// event failures are absorbed: the command is already queued and the
    /// device will pick it up regardless.
    pub async fn trigger(
        &self,
        plant_id: PlantId,
        duration_seconds: Option<u32>,
    ) -> Result<PendingCommand, SproutError> {
        let settings = settings_or_default(&self.profiles, &plant_id).await;
        let duration = duration_seconds.unwrap_or(settings.watering_duration);

        let command = PendingCommand::builder()
            .plant_id(plant_id.clone())
            .duration_seconds(duration)
            .source(CommandSource::Manual)
            .build()?;

        if let Some(dropped) = self.coordinator.queue(command.clone()) {
            tracing::warn!(
                plant_id = %plant_id,
                dropped_duration = dropped.duration_seconds,
                "replacing unconsumed watering command"
            );
        }
        tracing::info!(plant_id = %plant_id, duration, "manual watering command queued");

        self.record(
            WateringRecord::builder()
                .plant_id(plant_id)
                .kind(WateringKind::Manual)
                .duration_seconds(duration)
                .triggered_by(TriggeredBy::MobileApp)
                .status(WateringStatus::Queued)
                .build(),
        )
        .await;
        self.publish(EventKind::WateringQueued {
            command: command.clone(),
        })
        .await;

        Ok(command)
    }

    /// Answer a device poll: atomically take the pending command, if any.
    ///
    /// At-most-once delivery is the coordinator's job; this wrapper only
    /// adds the delivery event.
    pub async fn poll(&self, plant_id: &PlantId) -> Option<PendingCommand> {
        let command = self.coordinator.consume(plant_id)?;
        tracing::info!(
            plant_id = %plant_id,
            duration = command.duration_seconds,
            source = command.source.as_str(),
            "watering command delivered to device"
        );
        self.publish(EventKind::WateringDelivered {
            command: command.clone(),
        })
        .await;
        Some(command)
    }

    /// Record a pump-state report from the device.
    ///
    /// An active pump means the device ran a watering on its own (its local
    /// sensor loop); those runs are a fixed firmware length.
    pub async fn report_pump(&self, plant_id: PlantId, active: bool) {
        tracing::info!(plant_id = %plant_id, active, "device pump status");
        if active {
            self.record(
                WateringRecord::builder()
                    .plant_id(plant_id.clone())
                    .kind(WateringKind::Automatic)
                    .duration_seconds(DEFAULT_WATERING_DURATION)
                    .triggered_by(TriggeredBy::Device)
                    .status(WateringStatus::Completed)
                    .build(),
            )
            .await;
        }
        self.publish(EventKind::PumpReported { plant_id, active })
            .await;
    }

    async fn record(&self, record: WateringRecord) {
        if let Err(err) = self.history.record_watering(record).await {
            tracing::warn!(error = %err, "failed to append watering history");
        }
    }

    async fn publish(&self, kind: EventKind) {
        if let Err(err) = self.events.publish(Event::new(kind)).await {
            tracing::debug!(error = %err, "event publish failed");
        }
    }
}
