//! JSON REST handlers for watering triggers and history screens.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use sprout_app::ports::{EventPublisher, HistoryStore, PlantClassifier, ProfileRepository};
use sprout_domain::command::PendingCommand;
use sprout_domain::history::{DiseaseRecord, MoistureRecord, WateringRecord};

use crate::api::resolve_plant_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for triggering a watering.
#[derive(Deserialize)]
pub struct TriggerRequest {
    pub plant_id: Option<String>,
    /// Pump-on time in seconds; the plant's configured duration when absent.
    pub duration: Option<u32>,
}

/// Response for a queued watering command.
#[derive(Serialize)]
pub struct TriggerResponse {
    #[serde(flatten)]
    pub command: PendingCommand,
    /// Reminder for the client that delivery happens on the device's
    /// polling cadence, not immediately.
    pub note: &'static str,
}

/// Query parameters shared by the history endpoints.
#[derive(Deserialize)]
pub struct HistoryQuery {
    pub plant_id: Option<String>,
    pub limit: Option<usize>,
    /// Window in days, moisture history only.
    pub days: Option<i64>,
}

/// `POST /api/trigger-watering`
pub async fn trigger<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Json(req): Json<TriggerRequest>,
) -> Result<(StatusCode, Json<TriggerResponse>), ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(req.plant_id)?;
    let command = state.watering.trigger(plant_id, req.duration).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(TriggerResponse {
            command,
            note: "the device will pick this up on its next polling cycle",
        }),
    ))
}

/// `GET /api/watering-history`
pub async fn watering_history<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<WateringRecord>>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(query.plant_id)?;
    let records = state
        .history
        .waterings(plant_id, query.limit.unwrap_or(50))
        .await?;
    Ok(Json(records))
}

/// `GET /api/moisture-history`
pub async fn moisture_history<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<MoistureRecord>>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(query.plant_id)?;
    let records = state
        .history
        .moisture(plant_id, query.limit.unwrap_or(100), query.days.unwrap_or(7))
        .await?;
    Ok(Json(records))
}

/// `GET /api/disease-history`
pub async fn disease_history<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<DiseaseRecord>>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(query.plant_id)?;
    let records = state
        .history
        .diseases(plant_id, query.limit.unwrap_or(50))
        .await?;
    Ok(Json(records))
}
