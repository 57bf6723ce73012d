//! JSON REST handlers for the plant profile and its settings.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use sprout_app::ports::{EventPublisher, HistoryStore, PlantClassifier, ProfileRepository};
use sprout_app::services::profile_service::ProfileUpdate;
use sprout_domain::profile::{PlantProfile, PlantSettings, SettingsPatch};

use crate::api::resolve_plant_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters naming a plant.
#[derive(Deserialize)]
pub struct PlantQuery {
    pub plant_id: Option<String>,
}

/// Request body for creating or updating the profile.
#[derive(Deserialize)]
pub struct ProfileRequest {
    pub plant_id: Option<String>,
    pub plant_type: String,
    pub plant_name: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub moisture_threshold: Option<u8>,
}

/// Profile lookup result; `profile` is `null` when none was created yet.
#[derive(Serialize)]
pub struct ProfileResponse {
    pub plant_id: String,
    pub profile: Option<PlantProfile>,
}

/// Result of a profile write.
#[derive(Serialize)]
pub struct ProfileSavedResponse {
    /// `"created"` or `"updated"`.
    pub action: &'static str,
    #[serde(flatten)]
    pub profile: PlantProfile,
}

/// Request body for a partial settings update.
#[derive(Deserialize)]
pub struct SettingsRequest {
    pub plant_id: Option<String>,
    pub moisture_threshold: Option<u8>,
    pub auto_watering: Option<bool>,
    pub notification_enabled: Option<bool>,
    pub watering_duration: Option<u32>,
}

/// `GET /api/plant-profile`
pub async fn get_profile<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Query(query): Query<PlantQuery>,
) -> Result<Json<ProfileResponse>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(query.plant_id)?;
    let profile = state.profiles.get(plant_id.clone()).await?;
    Ok(Json(ProfileResponse {
        plant_id: plant_id.to_string(),
        profile,
    }))
}

/// `POST /api/plant-profile`
pub async fn upsert_profile<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<ProfileSavedResponse>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(req.plant_id)?;
    let (profile, action) = state
        .profiles
        .upsert(ProfileUpdate {
            plant_id,
            plant_type: req.plant_type,
            plant_name: req.plant_name,
            location: req.location,
            notes: req.notes,
            moisture_threshold: req.moisture_threshold,
        })
        .await?;
    Ok(Json(ProfileSavedResponse {
        action: action.as_str(),
        profile,
    }))
}

/// `GET /api/plant-settings`
pub async fn get_settings<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Query(query): Query<PlantQuery>,
) -> Result<Json<PlantSettings>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(query.plant_id)?;
    let settings = state.profiles.settings(plant_id).await?;
    Ok(Json(settings))
}

/// `PUT /api/plant-settings`
pub async fn update_settings<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Json(req): Json<SettingsRequest>,
) -> Result<Json<PlantSettings>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(req.plant_id)?;
    let settings = state
        .profiles
        .update_settings(
            plant_id,
            SettingsPatch {
                moisture_threshold: req.moisture_threshold,
                auto_watering: req.auto_watering,
                notification_enabled: req.notification_enabled,
                watering_duration: req.watering_duration,
            },
        )
        .await?;
    Ok(Json(settings))
}
