//! Plant profile — the per-plant document the mobile client edits.
//!
//! The profile carries identity (name, type, location) and the settings the
//! watering logic reads. A missing profile is not an error anywhere in the
//! system; callers fall back to [`PlantSettings::default`].

use serde::{Deserialize, Serialize};

use crate::error::{SproutError, ValidationError};
use crate::id::PlantId;
use crate::moisture::DEFAULT_MOISTURE_THRESHOLD;
use crate::time::Timestamp;

/// Default pump-on time in seconds when neither the request nor the profile
/// names one.
pub const DEFAULT_WATERING_DURATION: u32 = 3;

/// Tunable per-plant settings read by the watering and notification logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantSettings {
    /// Moisture percentage at or below which the plant counts as dry.
    pub moisture_threshold: u8,
    /// Whether low readings may raise automatic watering commands.
    pub auto_watering: bool,
    /// Whether moisture alerts should be produced for this plant.
    pub notification_enabled: bool,
    /// Pump-on time in seconds for triggered waterings.
    pub watering_duration: u32,
}

impl Default for PlantSettings {
    fn default() -> Self {
        Self {
            moisture_threshold: DEFAULT_MOISTURE_THRESHOLD,
            auto_watering: true,
            notification_enabled: true,
            watering_duration: DEFAULT_WATERING_DURATION,
        }
    }
}

/// Partial update for [`PlantSettings`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub moisture_threshold: Option<u8>,
    pub auto_watering: Option<bool>,
    pub notification_enabled: Option<bool>,
    pub watering_duration: Option<u32>,
}

impl SettingsPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moisture_threshold.is_none()
            && self.auto_watering.is_none()
            && self.notification_enabled.is_none()
            && self.watering_duration.is_none()
    }
}

impl PlantSettings {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(threshold) = patch.moisture_threshold {
            self.moisture_threshold = threshold;
        }
        if let Some(auto) = patch.auto_watering {
            self.auto_watering = auto;
        }
        if let Some(enabled) = patch.notification_enabled {
            self.notification_enabled = enabled;
        }
        if let Some(duration) = patch.watering_duration {
            self.watering_duration = duration;
        }
    }
}

/// The per-plant profile document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantProfile {
    pub plant_id: PlantId,
    pub plant_name: String,
    /// Catalog plant type, e.g. `"Aloe Vera"`.
    pub plant_type: String,
    pub location: String,
    pub notes: String,
    pub settings: PlantSettings,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PlantProfile {
    /// Create a builder for constructing a [`PlantProfile`].
    #[must_use]
    pub fn builder() -> PlantProfileBuilder {
        PlantProfileBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Validation`] when `plant_type` is empty.
    pub fn validate(&self) -> Result<(), SproutError> {
        if self.plant_type.is_empty() {
            return Err(ValidationError::EmptyPlantType.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`PlantProfile`].
#[derive(Debug, Default)]
pub struct PlantProfileBuilder {
    plant_id: Option<PlantId>,
    plant_name: Option<String>,
    plant_type: Option<String>,
    location: Option<String>,
    notes: Option<String>,
    settings: Option<PlantSettings>,
    created_at: Option<Timestamp>,
}

impl PlantProfileBuilder {
    #[must_use]
    pub fn plant_id(mut self, plant_id: PlantId) -> Self {
        self.plant_id = Some(plant_id);
        self
    }

    #[must_use]
    pub fn plant_name(mut self, plant_name: impl Into<String>) -> Self {
        self.plant_name = Some(plant_name.into());
        self
    }

    #[must_use]
    pub fn plant_type(mut self, plant_type: impl Into<String>) -> Self {
        self.plant_type = Some(plant_type.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: PlantSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`PlantProfile`].
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Validation`] if `plant_type` is missing or
    /// empty.
    pub fn build(self) -> Result<PlantProfile, SproutError> {
        let ts = self.created_at.unwrap_or_else(crate::time::now);
        let profile = PlantProfile {
            plant_id: self.plant_id.unwrap_or_default(),
            plant_name: self.plant_name.unwrap_or_else(|| "My Plant".to_string()),
            plant_type: self.plant_type.unwrap_or_default(),
            location: self.location.unwrap_or_else(|| "Indoor".to_string()),
            notes: self.notes.unwrap_or_default(),
            settings: self.settings.unwrap_or_default(),
            created_at: ts,
            updated_at: ts,
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_profile_with_defaults() {
        let profile = PlantProfile::builder()
            .plant_type("Aloe Vera")
            .build()
            .unwrap();
        assert_eq!(profile.plant_id.as_str(), "main_plant");
        assert_eq!(profile.plant_name, "My Plant");
        assert_eq!(profile.location, "Indoor");
        assert_eq!(profile.settings, PlantSettings::default());
    }

    #[test]
    fn should_reject_profile_without_plant_type() {
        let result = PlantProfile::builder().plant_name("Fern").build();
        assert!(matches!(
            result,
            Err(SproutError::Validation(ValidationError::EmptyPlantType))
        ));
    }

    #[test]
    fn should_default_settings_to_documented_values() {
        let settings = PlantSettings::default();
        assert_eq!(settings.moisture_threshold, 30);
        assert!(settings.auto_watering);
        assert!(settings.notification_enabled);
        assert_eq!(settings.watering_duration, 3);
    }

    #[test]
    fn should_apply_partial_patch() {
        let mut settings = PlantSettings::default();
        settings.apply(&SettingsPatch {
            moisture_threshold: Some(45),
            auto_watering: Some(false),
            ..SettingsPatch::default()
        });
        assert_eq!(settings.moisture_threshold, 45);
        assert!(!settings.auto_watering);
        assert!(settings.notification_enabled);
        assert_eq!(settings.watering_duration, 3);
    }

    #[test]
    fn should_report_empty_patch() {
        assert!(SettingsPatch::default().is_empty());
        assert!(
            !SettingsPatch {
                auto_watering: Some(true),
                ..SettingsPatch::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn should_roundtrip_profile_through_serde_json() {
        let profile = PlantProfile::builder()
            .plant_type("Orchid")
            .plant_name("Window Orchid")
            .build()
            .unwrap();
        let json = serde_json::to_string(&profile).unwrap();
        let parsed: PlantProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }
}
