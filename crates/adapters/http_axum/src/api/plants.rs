//! JSON REST handlers for the plant catalog and the image endpoints.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};

use sprout_app::ports::{EventPublisher, HistoryStore, PlantClassifier, ProfileRepository};
use sprout_domain::catalog;
use sprout_domain::diagnosis::{DiseaseAssessment, Identification};
use sprout_domain::error::ValidationError;
use sprout_domain::id::PlantId;
use sprout_domain::profile::PlantProfile;

use crate::api::resolve_plant_id;
use crate::error::ApiError;
use crate::state::AppState;

/// The supported-plant catalog.
#[derive(Serialize)]
pub struct PlantListResponse {
    pub plants: &'static [&'static str],
    pub total: usize,
}

/// Request body for confirming a plant type.
#[derive(Deserialize)]
pub struct SelectionRequest {
    pub selected_plant: String,
    pub plant_id: Option<String>,
}

/// Result of a confirmed selection.
#[derive(Serialize)]
pub struct SelectionResponse {
    pub selected_plant: String,
    pub has_specific_disease_model: bool,
    #[serde(flatten)]
    pub profile: PlantProfile,
}

/// Image upload parts shared by the two inference endpoints.
struct ImageUpload {
    image: Vec<u8>,
    plant_id: PlantId,
    plant_type: Option<String>,
}

/// Pull the `image` part (plus optional `plant_id`/`plant_type` fields) out
/// of a multipart body.
async fn read_upload(mut multipart: Multipart) -> Result<ImageUpload, ApiError> {
    let mut image = None;
    let mut plant_id = None;
    let mut plant_type = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::from(ValidationError::MissingImage))?
    {
        // take ownership of the name before the field is consumed
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::from(ValidationError::MissingImage))?;
                image = Some(bytes.to_vec());
            }
            Some("plant_id") => {
                if let Ok(text) = field.text().await {
                    plant_id = Some(text);
                }
            }
            Some("plant_type") => {
                if let Ok(text) = field.text().await {
                    plant_type = Some(text);
                }
            }
            _ => {}
        }
    }

    let image = image.filter(|bytes| !bytes.is_empty());
    let Some(image) = image else {
        return Err(ApiError::from(ValidationError::MissingImage));
    };
    Ok(ImageUpload {
        image,
        plant_id: resolve_plant_id(plant_id)?,
        plant_type: plant_type.filter(|text| !text.is_empty()),
    })
}

/// `GET /api/plants`
pub async fn list() -> Json<PlantListResponse> {
    Json(PlantListResponse {
        plants: catalog::SUPPORTED_PLANTS,
        total: catalog::SUPPORTED_PLANTS.len(),
    })
}

/// `POST /api/identify-plant`
pub async fn identify<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    multipart: Multipart,
) -> Result<Json<Identification>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let upload = read_upload(multipart).await?;
    let identification = state
        .diagnosis
        .identify(upload.plant_id, &upload.image)
        .await?;
    Ok(Json(identification))
}

/// `POST /api/check-disease`
pub async fn check_disease<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    multipart: Multipart,
) -> Result<Json<DiseaseAssessment>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let upload = read_upload(multipart).await?;
    let assessment = state
        .diagnosis
        .check_disease(upload.plant_id, upload.plant_type, &upload.image)
        .await?;
    Ok(Json(assessment))
}

/// `POST /api/plant-selection`
pub async fn select<PR, HS, CL, EP>(
    State(state): State<AppState<PR, HS, CL, EP>>,
    Json(req): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, ApiError>
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let plant_id = resolve_plant_id(req.plant_id)?;
    let (profile, has_specific_disease_model) = state
        .profiles
        .select_plant_type(plant_id, req.selected_plant.clone())
        .await?;
    Ok(Json(SelectionResponse {
        selected_plant: req.selected_plant,
        has_specific_disease_model,
        profile,
    }))
}
