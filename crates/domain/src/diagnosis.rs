//! Diagnosis results — plant identification and disease assessment.
//!
//! Inference itself happens behind the `PlantClassifier` port; these are the
//! domain-shaped results it produces.

use serde::{Deserialize, Serialize};

/// Disease score at or above which a plant is considered diseased.
pub const DISEASE_CONFIDENCE_THRESHOLD: f32 = 0.85;

/// One candidate plant type from the identification model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub plant_type: String,
    /// Model confidence in `0.0..=1.0`.
    pub confidence: f32,
}

/// Result of running the identification model over an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    /// Top candidates, best first.
    pub predictions: Vec<Prediction>,
    /// Name of the model that produced the candidates.
    pub model: String,
}

/// Health verdict of a disease check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseStatus {
    Healthy,
    Diseased,
}

impl DiseaseStatus {
    /// Stable lowercase label used in records and responses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Diseased => "diseased",
        }
    }
}

/// Result of running a disease model over an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseAssessment {
    pub status: DiseaseStatus,
    /// Disease score reported by the model, in `0.0..=1.0`.
    pub confidence: f32,
    /// Name of the model that produced the verdict.
    pub model: String,
}

impl DiseaseAssessment {
    /// Build an assessment from a raw disease score, applying
    /// [`DISEASE_CONFIDENCE_THRESHOLD`].
    #[must_use]
    pub fn from_score(score: f32, model: impl Into<String>) -> Self {
        let status = if score >= DISEASE_CONFIDENCE_THRESHOLD {
            DiseaseStatus::Diseased
        } else {
            DiseaseStatus::Healthy
        };
        Self {
            status,
            confidence: score,
            model: model.into(),
        }
    }

    /// True when the verdict is [`DiseaseStatus::Healthy`].
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == DiseaseStatus::Healthy
    }
}
