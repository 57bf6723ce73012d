//! Profile service — use-cases for the plant profile and its settings.

use sprout_domain::catalog;
use sprout_domain::error::{NotFoundError, SproutError, ValidationError};
use sprout_domain::id::PlantId;
use sprout_domain::profile::{PlantProfile, PlantSettings, SettingsPatch};
use sprout_domain::time::now;

use crate::ports::ProfileRepository;

/// Fields the mobile client may set when creating or updating the profile.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub plant_id: PlantId,
    pub plant_type: String,
    pub plant_name: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub moisture_threshold: Option<u8>,
}

/// Whether an upsert created a fresh profile or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Created,
    Updated,
}

impl UpsertAction {
    /// Stable lowercase label for responses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

/// Application service for profile reads and writes.
pub struct ProfileService<PR> {
    profiles: PR,
}

impl<PR: ProfileRepository> ProfileService<PR> {
    /// Create a new service backed by the given repository.
    pub fn new(profiles: PR) -> Self {
        Self { profiles }
    }

    /// Fetch the profile, `None` when it was never created.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get(&self, plant_id: PlantId) -> Result<Option<PlantProfile>, SproutError> {
        self.profiles.get(plant_id).await
    }

    /// Create the profile or update the existing one.
    ///
    /// On update, `created_at` and any settings not named by the request are
    /// preserved.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Validation`] for an empty plant type, or a
    /// storage error from the repository.
    pub async fn upsert(
        &self,
        update: ProfileUpdate,
    ) -> Result<(PlantProfile, UpsertAction), SproutError> {
        if update.plant_type.is_empty() {
            return Err(ValidationError::EmptyPlantType.into());
        }

        let existing = self.profiles.get(update.plant_id.clone()).await?;
        let action = if existing.is_some() {
            UpsertAction::Updated
        } else {
            UpsertAction::Created
        };

        let mut settings = existing
            .as_ref()
            .map_or_else(PlantSettings::default, |profile| profile.settings.clone());
        if let Some(threshold) = update.moisture_threshold {
            settings.moisture_threshold = threshold;
        }

        let mut builder = PlantProfile::builder()
            .plant_id(update.plant_id)
            .plant_type(update.plant_type)
            .settings(settings);
        if let Some(name) = update.plant_name {
            builder = builder.plant_name(name);
        }
        if let Some(location) = update.location {
            builder = builder.location(location);
        }
        if let Some(notes) = update.notes {
            builder = builder.notes(notes);
        }
        if let Some(profile) = &existing {
            builder = builder.created_at(profile.created_at);
        }

        let mut profile = builder.build()?;
        profile.updated_at = now();

        tracing::info!(
            plant_id = %profile.plant_id,
            plant_type = %profile.plant_type,
            action = action.as_str(),
            "plant profile saved"
        );
        let saved = self.profiles.upsert(profile).await?;
        Ok((saved, action))
    }

    /// The plant's settings, falling back to defaults when no profile
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn settings(&self, plant_id: PlantId) -> Result<PlantSettings, SproutError> {
        Ok(self
            .profiles
            .get(plant_id)
            .await?
            .map_or_else(PlantSettings::default, |profile| profile.settings))
    }

    /// Apply a partial settings update to an existing profile.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::NotFound`] when the profile was never created,
    /// [`SproutError::Validation`] for a zero watering duration, or a
    /// storage error from the repository.
    pub async fn update_settings(
        &self,
        plant_id: PlantId,
        patch: SettingsPatch,
    ) -> Result<PlantSettings, SproutError> {
        if patch.watering_duration == Some(0) {
            return Err(ValidationError::ZeroDuration.into());
        }

        let mut profile = self.profiles.get(plant_id.clone()).await?.ok_or_else(|| {
            NotFoundError {
                entity: "PlantProfile",
                id: plant_id.to_string(),
            }
        })?;

        profile.settings.apply(&patch);
        profile.updated_at = now();
        tracing::info!(plant_id = %plant_id, "plant settings updated");

        let saved = self.profiles.upsert(profile).await?;
        Ok(saved.settings)
    }

    /// Store the user's confirmed plant type, reporting whether a dedicated
    /// disease model exists for it. Creates a default profile when none
    /// exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Validation`] when the type is not in the
    /// supported catalog, or a storage error from the repository.
    pub async fn select_plant_type(
        &self,
        plant_id: PlantId,
        plant_type: String,
    ) -> Result<(PlantProfile, bool), SproutError> {
        if !catalog::is_supported(&plant_type) {
            return Err(ValidationError::UnsupportedPlantType(plant_type).into());
        }

        let profile = match self.profiles.get(plant_id.clone()).await? {
            Some(mut profile) => {
                profile.plant_type.clone_from(&plant_type);
                profile.updated_at = now();
                profile
            }
            None => PlantProfile::builder()
                .plant_id(plant_id)
                .plant_type(plant_type.clone())
                .build()?,
        };

        tracing::info!(plant_id = %profile.plant_id, plant_type = %plant_type, "plant type selected");
        let saved = self.profiles.upsert(profile).await?;
        let has_specific_model = catalog::has_specific_disease_model(&plant_type);
        Ok((saved, has_specific_model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tests::InMemoryProfiles;

    fn service() -> ProfileService<InMemoryProfiles> {
        ProfileService::new(InMemoryProfiles::default())
    }

    fn update(plant_type: &str) -> ProfileUpdate {
        ProfileUpdate {
            plant_id: PlantId::main(),
            plant_type: plant_type.to_string(),
            plant_name: None,
            location: None,
            notes: None,
            moisture_threshold: None,
        }
    }

    #[tokio::test]
    async fn should_create_profile_on_first_upsert() {
        let svc = service();
        let (profile, action) = svc.upsert(update("Aloe Vera")).await.unwrap();
        assert_eq!(action, UpsertAction::Created);
        assert_eq!(profile.plant_type, "Aloe Vera");
        assert_eq!(profile.plant_name, "My Plant");
    }

    #[tokio::test]
    async fn should_update_profile_and_preserve_created_at() {
        let svc = service();
        let (created, _) = svc.upsert(update("Aloe Vera")).await.unwrap();

        let (updated, action) = svc
            .upsert(ProfileUpdate {
                plant_name: Some("Desk Aloe".to_string()),
                ..update("Aloe Vera")
            })
            .await
            .unwrap();

        assert_eq!(action, UpsertAction::Updated);
        assert_eq!(updated.plant_name, "Desk Aloe");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn should_reject_upsert_without_plant_type() {
        let svc = service();
        let result = svc.upsert(update("")).await;
        assert!(matches!(
            result,
            Err(SproutError::Validation(ValidationError::EmptyPlantType))
        ));
    }

    #[tokio::test]
    async fn should_return_default_settings_without_profile() {
        let svc = service();
        let settings = svc.settings(PlantId::main()).await.unwrap();
        assert_eq!(settings, PlantSettings::default());
    }

    #[tokio::test]
    async fn should_patch_settings_on_existing_profile() {
        let svc = service();
        svc.upsert(update("Aloe Vera")).await.unwrap();

        let settings = svc
            .update_settings(
                PlantId::main(),
                SettingsPatch {
                    moisture_threshold: Some(42),
                    ..SettingsPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(settings.moisture_threshold, 42);
        assert!(settings.auto_watering);
    }

    #[tokio::test]
    async fn should_return_not_found_when_patching_missing_profile() {
        let svc = service();
        let result = svc
            .update_settings(PlantId::main(), SettingsPatch::default())
            .await;
        assert!(matches!(result, Err(SproutError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_zero_watering_duration_patch() {
        let svc = service();
        svc.upsert(update("Aloe Vera")).await.unwrap();

        let result = svc
            .update_settings(
                PlantId::main(),
                SettingsPatch {
                    watering_duration: Some(0),
                    ..SettingsPatch::default()
                },
            )
            .await;
        assert!(matches!(
            result,
            Err(SproutError::Validation(ValidationError::ZeroDuration))
        ));
    }

    #[tokio::test]
    async fn should_select_supported_plant_type() {
        let svc = service();
        let (profile, has_model) = svc
            .select_plant_type(PlantId::main(), "Orchid".to_string())
            .await
            .unwrap();
        assert_eq!(profile.plant_type, "Orchid");
        assert!(has_model);
    }

    #[tokio::test]
    async fn should_report_missing_specific_model() {
        let svc = service();
        let (_, has_model) = svc
            .select_plant_type(PlantId::main(), "Monstera".to_string())
            .await
            .unwrap();
        assert!(!has_model);
    }

    #[tokio::test]
    async fn should_reject_unsupported_plant_type() {
        let svc = service();
        let result = svc
            .select_plant_type(PlantId::main(), "Triffid".to_string())
            .await;
        assert!(matches!(
            result,
            Err(SproutError::Validation(ValidationError::UnsupportedPlantType(_)))
        ));
    }

    #[tokio::test]
    async fn should_keep_existing_profile_fields_when_selecting_type() {
        let svc = service();
        svc.upsert(ProfileUpdate {
            plant_name: Some("Desk Plant".to_string()),
            ..update("Aloe Vera")
        })
        .await
        .unwrap();

        let (profile, _) = svc
            .select_plant_type(PlantId::main(), "Cactus".to_string())
            .await
            .unwrap();
        assert_eq!(profile.plant_type, "Cactus");
        assert_eq!(profile.plant_name, "Desk Plant");
    }
}
