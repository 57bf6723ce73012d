//! Shared application state for axum handlers.

use std::sync::Arc;

use sprout_app::coordinator::WateringCoordinator;
use sprout_app::ports::{EventPublisher, HistoryStore, PlantClassifier, ProfileRepository};
use sprout_app::services::diagnosis_service::DiagnosisService;
use sprout_app::services::history_service::HistoryService;
use sprout_app::services::notification_service::NotificationService;
use sprout_app::services::profile_service::ProfileService;
use sprout_app::services::telemetry_service::TelemetryService;
use sprout_app::services::watering_service::WateringService;
use sprout_domain::time::Timestamp;

/// Build/runtime facts surfaced by the system-status endpoint.
#[derive(Debug, Clone)]
pub struct SystemInfo {
    /// Daemon version, taken from the binary crate.
    pub version: &'static str,
    /// Label of the configured storage backend (`memory` or `firestore`).
    pub storage_backend: &'static str,
    /// Label of the configured classifier backend.
    pub classifier_backend: &'static str,
    /// When the process came up.
    pub started_at: Timestamp,
}

/// Application state shared across all axum handlers.
///
/// Generic over the profile repository, history store, classifier, and
/// event publisher to avoid dynamic dispatch. `Clone` is implemented
/// manually so the underlying types themselves do not need to be `Clone` —
/// only the `Arc` wrappers are cloned.
pub struct AppState<PR, HS, CL, EP> {
    /// Watering triggers, device polling, pump reports.
    pub watering: Arc<WateringService<PR, HS, EP>>,
    /// Sensor-reading ingestion and the auto-watering decision.
    pub telemetry: Arc<TelemetryService<PR, HS, EP>>,
    /// Profile and settings use-cases.
    pub profiles: Arc<ProfileService<PR>>,
    /// History queries.
    pub history: Arc<HistoryService<HS>>,
    /// Identification and disease checks.
    pub diagnosis: Arc<DiagnosisService<CL, HS, EP>>,
    /// Notification history.
    pub notifications: Arc<NotificationService>,
    /// Pending-command state, for the status endpoint.
    pub coordinator: Arc<WateringCoordinator>,
    /// Static deployment facts.
    pub info: SystemInfo,
}

impl<PR, HS, CL, EP> Clone for AppState<PR, HS, CL, EP> {
    fn clone(&self) -> Self {
        Self {
            watering: Arc::clone(&self.watering),
            telemetry: Arc::clone(&self.telemetry),
            profiles: Arc::clone(&self.profiles),
            history: Arc::clone(&self.history),
            diagnosis: Arc::clone(&self.diagnosis),
            notifications: Arc::clone(&self.notifications),
            coordinator: Arc::clone(&self.coordinator),
            info: self.info.clone(),
        }
    }
}

impl<PR, HS, CL, EP> AppState<PR, HS, CL, EP>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        watering: WateringService<PR, HS, EP>,
        telemetry: TelemetryService<PR, HS, EP>,
        profiles: ProfileService<PR>,
        history: HistoryService<HS>,
        diagnosis: DiagnosisService<CL, HS, EP>,
        notifications: Arc<NotificationService>,
        coordinator: Arc<WateringCoordinator>,
        info: SystemInfo,
    ) -> Self {
        Self {
            watering: Arc::new(watering),
            telemetry: Arc::new(telemetry),
            profiles: Arc::new(profiles),
            history: Arc::new(history),
            diagnosis: Arc::new(diagnosis),
            notifications,
            coordinator,
            info,
        }
    }
}
