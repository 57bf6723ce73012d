//! Handlers for the device polling protocol.
//!
//! These are consumed by microcontroller firmware, not the mobile client;
//! shapes here must stay byte-compatible with what the firmware parses.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use sprout_app::ports::{EventPublisher, HistoryStore, PlantClassifier, ProfileRepository};
use sprout_app::services::telemetry_service::SensorReading;
use sprout_domain::moisture::MoistureLevel;

use crate::api::resolve_plant_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the poll endpoint.
#[derive(Deserialize)]
pub struct ShouldWaterQuery {
    pub plant_id: Option<String>,
}

/// Pump state report. The field name is the firmware's, verbatim.
#[derive(Deserialize)]
pub struct PumpStatusRequest {
    #[serde(default, rename = "pumpActive")]
    pub pump_active: bool,
    pub plant_id: Option<String>,
}

/// Acknowledgement for a pump report.
#[derive(Serialize)]
pub struct PumpStatusResponse {
    pub pump_active: bool,
}

/// One reading pushed by the device.
#[derive(Deserialize)]
pub struct SensorDataRequest {
    pub plant_id: Option<String>,
    pub moisture: u8,
    pub temperature: Option<f32>,
    pub humidity: Option<u8>,
}

/// What ingestion decided, echoed back to the device.
#[derive(Serialize)]
pub struct SensorDataResponse {
    pub level: MoistureLevel,
    /// True when this reading queued an automatic watering command.
    pub watering_queued: bool,
}

/// `GET /api/should-water`
///
/// Consumes the pending command. Plain-text `true`/`false` body — the
/// firmware string-matches it.
pub async fn should_water<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Query(query): Query<ShouldWaterQuery>,
) -> Result<&'static str, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(query.plant_id)?;
    match state.watering.poll(&plant_id).await {
        Some(_) => Ok("true"),
        None => Ok("false"),
    }
}

/// `POST /api/pump-status`
pub async fn pump_status<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Json(req): Json<PumpStatusRequest>,
) -> Result<Json<PumpStatusResponse>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(req.plant_id)?;
    state.watering.report_pump(plant_id, req.pump_active).await;
    Ok(Json(PumpStatusResponse {
        pump_active: req.pump_active,
    }))
}

/// `POST /api/sensor-data`
pub async fn sensor_data<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Json(req): Json<SensorDataRequest>,
) -> Result<Json<SensorDataResponse>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(req.plant_id)?;
    let outcome = state
        .telemetry
        .ingest(SensorReading {
            plant_id,
            moisture_percent: req.moisture,
            temperature_celsius: req.temperature,
            humidity_percent: req.humidity,
        })
        .await?;
    Ok(Json(SensorDataResponse {
        level: outcome.level,
        watering_queued: outcome.queued.is_some(),
    }))
}
