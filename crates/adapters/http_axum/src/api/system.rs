//! Service banner, system status, and notification history.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use serde_json::json;

use sprout_app::ports::{EventPublisher, HistoryStore, PlantClassifier, ProfileRepository};
use sprout_domain::id::PlantId;
use sprout_domain::notification::Notification;
use sprout_domain::time::now;

use crate::error::ApiError;
use crate::state::AppState;

/// Detailed status for the mobile client's diagnostics screen.
#[derive(Serialize)]
pub struct SystemStatusResponse {
    pub version: &'static str,
    pub mode: &'static str,
    pub uptime_seconds: i64,
    pub storage_backend: &'static str,
    pub classifier_backend: &'static str,
    pub pending_water_commands: usize,
}

/// Query parameters for the notification history.
#[derive(Deserialize)]
pub struct NotificationQuery {
    /// Filter by plant; absent means all plants.
    pub plant_id: Option<String>,
    pub limit: Option<usize>,
}

/// `GET /`
///
/// The endpoint map the mobile client uses as a discovery document.
pub async fn index<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
) -> Json<serde_json::Value>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    Json(json!({
        "name": "sprout",
        "version": state.info.version,
        "status": "running",
        "endpoints": {
            "plant_management": {
                "plants": "GET /api/plants",
                "identify_plant": "POST /api/identify-plant",
                "plant_selection": "POST /api/plant-selection",
                "plant_profile": "GET/POST /api/plant-profile",
                "plant_settings": "GET/PUT /api/plant-settings",
            },
            "watering_system": {
                "trigger_watering": "POST /api/trigger-watering",
                "watering_history": "GET /api/watering-history",
                "moisture_history": "GET /api/moisture-history",
            },
            "health_monitoring": {
                "check_disease": "POST /api/check-disease",
                "disease_history": "GET /api/disease-history",
                "notifications": "GET /api/notifications",
            },
            "device": {
                "should_water": "GET /api/should-water",
                "pump_status": "POST /api/pump-status",
                "sensor_data": "POST /api/sensor-data",
            },
            "system": {
                "health": "GET /health",
                "system_status": "GET /api/system-status",
            },
        },
    }))
}

/// `GET /api/system-status`
pub async fn status<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
) -> Json<SystemStatusResponse>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    Json(SystemStatusResponse {
        version: state.info.version,
        mode: "single_user_single_plant",
        uptime_seconds: (now() - state.info.started_at).num_seconds(),
        storage_backend: state.info.storage_backend,
        classifier_backend: state.info.classifier_backend,
        pending_water_commands: state.coordinator.pending_count(),
    })
}

/// `GET /api/notifications`
pub async fn notifications<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Vec<Notification>>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = match query.plant_id {
        Some(id) => Some(PlantId::new(id).map_err(ApiError::from)?),
        None => None,
    };
    let recent = state
        .notifications
        .recent(plant_id.as_ref(), query.limit.unwrap_or(50));
    Ok(Json(recent))
}
