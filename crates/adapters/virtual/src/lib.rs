//! # sprout-adapter-virtual
//!
//! Simulated classifier for development and tests.
//!
//! The real deployment loads TFLite models; this adapter stands in when no
//! model files are present, the same way the original backend falls back to
//! a mock mode. Results are a pure function of the image bytes, so repeated
//! uploads of the same image give the same answer.
//!
//! ## Dependency rule
//! Depends on `sprout-app` (port traits) and `sprout-domain` only.

use std::future::Future;

use sprout_app::ports::PlantClassifier;
use sprout_domain::catalog;
use sprout_domain::diagnosis::{DiseaseAssessment, Identification, Prediction};
use sprout_domain::error::SproutError;

/// Number of candidates the identification endpoint returns.
const TOP_PREDICTIONS: usize = 5;

/// Deterministic pseudo-classifier over the supported-plant catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualClassifier;

impl VirtualClassifier {
    /// Create a new classifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn check_image(image: &[u8]) -> Result<(), SproutError> {
        if image.is_empty() {
            return Err(SproutError::Inference("empty image".into()));
        }
        Ok(())
    }
}

/// FNV-1a over the image bytes; cheap and stable across runs.
fn fingerprint(image: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in image {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

impl PlantClassifier for VirtualClassifier {
    fn identify(
        &self,
        image: &[u8],
    ) -> impl Future<Output = Result<Identification, SproutError>> + Send {
        let result = Self::check_image(image).map(|()| {
            let hash = fingerprint(image);
            let plants = catalog::SUPPORTED_PLANTS;
            let start = usize::try_from(hash % plants.len() as u64).unwrap_or(0);

            // Descending pseudo-confidences that sum to just under 1.
            let predictions = (0..TOP_PREDICTIONS)
                .map(|rank| Prediction {
                    plant_type: plants[(start + rank * 7) % plants.len()].to_string(),
                    confidence: 0.9 / 2.0_f32.powi(i32::try_from(rank).unwrap_or(0)),
                })
                .collect();

            tracing::debug!(fingerprint = hash, "virtual identification");
            Identification {
                predictions,
                model: "virtual".to_string(),
            }
        });
        async { result }
    }

    fn assess_disease(
        &self,
        image: &[u8],
        plant_type: Option<&str>,
    ) -> impl Future<Output = Result<DiseaseAssessment, SproutError>> + Send {
        let result = Self::check_image(image).map(|()| {
            let hash = fingerprint(image);
            #[allow(clippy::cast_precision_loss)]
            let score = (hash % 1000) as f32 / 1000.0;
            let model = match plant_type {
                Some(plant) if catalog::has_specific_disease_model(plant) => {
                    format!("virtual:{plant}")
                }
                _ => "virtual:general".to_string(),
            };
            tracing::debug!(fingerprint = hash, score, model = %model, "virtual disease check");
            DiseaseAssessment::from_score(score, model)
        });
        async { result }
    }
}
