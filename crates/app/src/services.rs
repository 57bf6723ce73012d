//! Application services — one per concern.

pub mod diagnosis_service;
pub mod history_service;
pub mod notification_service;
pub mod profile_service;
pub mod telemetry_service;
pub mod watering_service;

use sprout_domain::id::PlantId;
use sprout_domain::profile::PlantSettings;

use crate::ports::ProfileRepository;

#[cfg(test)]
pub(crate) mod tests;

/// Resolve a plant's settings, falling back to the documented defaults when
/// no profile exists or the store is unreachable. Store faults are logged
/// and absorbed here so watering decisions keep working on defaults.
pub(crate) async fn settings_or_default<PR: ProfileRepository>(
    profiles: &PR,
    plant_id: &PlantId,
) -> PlantSettings {
    match profiles.get(plant_id.clone()).await {
        Ok(Some(profile)) => profile.settings,
        Ok(None) => PlantSettings::default(),
        Err(err) => {
            tracing::warn!(plant_id = %plant_id, error = %err, "profile lookup failed, using default settings");
            PlantSettings::default()
        }
    }
}
