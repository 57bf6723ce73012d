//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod device;
#[allow(clippy::missing_errors_doc)]
pub mod plants;
#[allow(clippy::missing_errors_doc)]
pub mod profile;
#[allow(clippy::missing_errors_doc)]
pub mod system;
#[allow(clippy::missing_errors_doc)]
pub mod watering;

use axum::Router;
use axum::routing::{get, post};

use sprout_app::ports::{EventPublisher, HistoryStore, PlantClassifier, ProfileRepository};
use sprout_domain::id::PlantId;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<PR, HS, CL, EP>() -> Router<AppState<PR, HS, CL, EP>>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        // Watering
        .route(
            "/trigger-watering",
            post(watering::trigger::<PR, HS, CL, EP>),
        )
        .route(
            "/watering-history",
            get(watering::watering_history::<PR, HS, CL, EP>),
        )
        .route(
            "/moisture-history",
            get(watering::moisture_history::<PR, HS, CL, EP>),
        )
        .route(
            "/disease-history",
            get(watering::disease_history::<PR, HS, CL, EP>),
        )
        // Device protocol
        .route("/should-water", get(device::should_water::<PR, HS, CL, EP>))
        .route("/pump-status", post(device::pump_status::<PR, HS, CL, EP>))
        .route("/sensor-data", post(device::sensor_data::<PR, HS, CL, EP>))
        // Profile
        .route(
            "/plant-profile",
            get(profile::get_profile::<PR, HS, CL, EP>)
                .post(profile::upsert_profile::<PR, HS, CL, EP>),
        )
        .route(
            "/plant-settings",
            get(profile::get_settings::<PR, HS, CL, EP>)
                .put(profile::update_settings::<PR, HS, CL, EP>),
        )
        // Plants & diagnosis
        .route("/plants", get(plants::list))
        .route("/identify-plant", post(plants::identify::<PR, HS, CL, EP>))
        .route("/check-disease", post(plants::check_disease::<PR, HS, CL, EP>))
        .route("/plant-selection", post(plants::select::<PR, HS, CL, EP>))
        // System
        .route("/system-status", get(system::status::<PR, HS, CL, EP>))
        .route(
            "/notifications",
            get(system::notifications::<PR, HS, CL, EP>),
        )
}

/// Resolve an optional request plant id, defaulting to the main plant.
fn resolve_plant_id(plant_id: Option<String>) -> Result<PlantId, ApiError> {
    match plant_id {
        Some(id) => PlantId::new(id).map_err(ApiError::from),
        None => Ok(PlantId::main()),
    }
}

