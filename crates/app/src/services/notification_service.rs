//! Notification service — turns bus events into user-facing alerts.
//!
//! Push delivery is not wired up; each notification is logged and kept in a
//! bounded in-memory history that the API exposes.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use tokio::sync::broadcast;

use sprout_domain::diagnosis::DiseaseStatus;
use sprout_domain::event::{Event, EventKind};
use sprout_domain::id::PlantId;
use sprout_domain::moisture::MoistureLevel;
use sprout_domain::notification::{Notification, NotificationKind, Priority};

/// How many notifications to keep before dropping the oldest.
const DEFAULT_CAPACITY: usize = 100;

/// Converts events into notifications and keeps the recent ones.
pub struct NotificationService {
    history: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NotificationService {
    /// Create a service keeping the default number of notifications.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service keeping at most `capacity` notifications.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Consume events from the bus until it closes.
    ///
    /// Spawned once at startup. A lagged receiver skips ahead: losing an
    /// alert beats blocking publishers.
    pub async fn run(&self, mut events: broadcast::Receiver<Event>) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    self.handle_event(&event);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification worker lagged behind the event bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    /// Convert one event into a notification, if it warrants one.
    ///
    /// Moisture alerts respect the plant's `notification_enabled` flag;
    /// watering and disease notifications are always produced.
    pub fn handle_event(&self, event: &Event) -> Option<Notification> {
        let notification = match &event.kind {
            EventKind::MoistureMeasured {
                plant_id,
                moisture_percent,
                level,
                notifications_enabled,
            } => {
                if !notifications_enabled {
                    return None;
                }
                Self::moisture_alert(plant_id.clone(), *moisture_percent, *level)?
            }
            EventKind::WateringDelivered { command } => Notification::new(
                command.plant_id.clone(),
                NotificationKind::WateringDone,
                Priority::Normal,
                "Watering started",
                format!(
                    "A {} watering command is running for {} seconds.",
                    command.source.as_str(),
                    command.duration_seconds
                ),
            ),
            EventKind::PumpReported { plant_id, active } => {
                if !active {
                    return None;
                }
                Notification::new(
                    plant_id.clone(),
                    NotificationKind::WateringDone,
                    Priority::Normal,
                    "Plant watered",
                    "The device watered the plant after a dry sensor reading.",
                )
            }
            EventKind::DiseaseChecked {
                plant_id,
                status,
                confidence,
            } => Self::disease_alert(plant_id.clone(), *status, *confidence),
            EventKind::WateringQueued { .. } => return None,
        };

        tracing::info!(
            plant_id = %notification.plant_id,
            title = %notification.title,
            message = %notification.message,
            "notification"
        );
        self.push(notification.clone());
        Some(notification)
    }

    /// The most recent notifications, newest first, optionally filtered by
    /// plant.
    pub fn recent(&self, plant_id: Option<&PlantId>, limit: usize) -> Vec<Notification> {
        self.lock()
            .iter()
            .rev()
            .filter(|notification| plant_id.is_none_or(|id| notification.plant_id == *id))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of notifications currently retained.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when no notifications have been produced yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn moisture_alert(
        plant_id: PlantId,
        moisture_percent: u8,
        level: MoistureLevel,
    ) -> Option<Notification> {
        match level {
            MoistureLevel::Critical => Some(Notification::new(
                plant_id,
                NotificationKind::MoistureAlert,
                Priority::High,
                "Critical moisture level",
                format!("Moisture is down to {moisture_percent}%. Water the plant now."),
            )),
            MoistureLevel::Low => Some(Notification::new(
                plant_id,
                NotificationKind::MoistureAlert,
                Priority::Normal,
                "Low moisture level",
                format!("Moisture is at {moisture_percent}%. Time to water soon."),
            )),
            MoistureLevel::Normal => None,
        }
    }

    fn disease_alert(plant_id: PlantId, status: DiseaseStatus, confidence: f32) -> Notification {
        let percent = confidence * 100.0;
        match status {
            DiseaseStatus::Diseased => Notification::new(
                plant_id,
                NotificationKind::DiseaseAlert,
                Priority::High,
                "Disease detected",
                format!("The analysis found signs of disease ({percent:.1}% confidence)."),
            ),
            DiseaseStatus::Healthy => Notification::new(
                plant_id,
                NotificationKind::DiseaseAlert,
                Priority::Low,
                "Plant looks healthy",
                format!("The analysis found no signs of disease ({percent:.1}% confidence)."),
            ),
        }
    }

    fn push(&self, notification: Notification) {
        let mut history = self.lock();
        if history.len() == self.capacity {
            history.pop_front();
        }
        history.push_back(notification);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notification>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_domain::command::PendingCommand;

    fn measured(level: MoistureLevel, moisture: u8, enabled: bool) -> Event {
        Event::new(EventKind::MoistureMeasured {
            plant_id: PlantId::main(),
            moisture_percent: moisture,
            level,
            notifications_enabled: enabled,
        })
    }

    #[test]
    fn should_raise_high_priority_alert_for_critical_moisture() {
        let svc = NotificationService::new();
        let notification = svc
            .handle_event(&measured(MoistureLevel::Critical, 12, true))
            .unwrap();
        assert_eq!(notification.kind, NotificationKind::MoistureAlert);
        assert_eq!(notification.priority, Priority::High);
        assert!(notification.message.contains("12%"));
    }

    #[test]
    fn should_stay_quiet_for_normal_moisture() {
        let svc = NotificationService::new();
        assert!(
            svc.handle_event(&measured(MoistureLevel::Normal, 55, true))
                .is_none()
        );
        assert!(svc.is_empty());
    }

    #[test]
    fn should_respect_disabled_notifications() {
        let svc = NotificationService::new();
        assert!(
            svc.handle_event(&measured(MoistureLevel::Critical, 5, false))
                .is_none()
        );
    }

    #[test]
    fn should_notify_on_delivered_watering() {
        let svc = NotificationService::new();
        let command = PendingCommand::builder()
            .duration_seconds(5)
            .build()
            .unwrap();
        let notification = svc
            .handle_event(&Event::new(EventKind::WateringDelivered { command }))
            .unwrap();
        assert_eq!(notification.kind, NotificationKind::WateringDone);
        assert!(notification.message.contains("5 seconds"));
    }

    #[test]
    fn should_ignore_inactive_pump_reports() {
        let svc = NotificationService::new();
        let event = Event::new(EventKind::PumpReported {
            plant_id: PlantId::main(),
            active: false,
        });
        assert!(svc.handle_event(&event).is_none());
    }

    #[test]
    fn should_cap_history_and_drop_oldest() {
        let svc = NotificationService::with_capacity(2);
        for moisture in [10, 11, 12] {
            svc.handle_event(&measured(MoistureLevel::Critical, moisture, true));
        }
        let recent = svc.recent(None, 10);
        assert_eq!(recent.len(), 2);
        assert!(recent[0].message.contains("12%"));
        assert!(recent[1].message.contains("11%"));
    }

    #[test]
    fn should_filter_recent_by_plant() {
        let svc = NotificationService::new();
        svc.handle_event(&measured(MoistureLevel::Low, 25, true));
        svc.handle_event(&Event::new(EventKind::MoistureMeasured {
            plant_id: PlantId::new("balcony").unwrap(),
            moisture_percent: 18,
            level: MoistureLevel::Critical,
            notifications_enabled: true,
        }));

        let main_only = svc.recent(Some(&PlantId::main()), 10);
        assert_eq!(main_only.len(), 1);
        assert_eq!(main_only[0].plant_id, PlantId::main());
    }

    #[tokio::test]
    async fn should_consume_events_from_the_bus() {
        use crate::event_bus::InProcessEventBus;
        use crate::ports::EventPublisher as _;
        use std::sync::Arc;

        let bus = InProcessEventBus::new(16);
        let svc = Arc::new(NotificationService::new());
        let worker = {
            let svc = Arc::clone(&svc);
            let rx = bus.subscribe();
            tokio::spawn(async move { svc.run(rx).await })
        };

        bus.publish(measured(MoistureLevel::Critical, 9, true))
            .await
            .unwrap();
        drop(bus);
        worker.await.unwrap();

        assert_eq!(svc.len(), 1);
    }
}
