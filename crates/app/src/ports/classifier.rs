//! Classifier port — image-based plant identification and disease inference.
//!
//! Model files, preprocessing, and the inference runtime all live behind
//! this trait; the application only sees domain-shaped results.

use std::future::Future;
use std::sync::Arc;

use sprout_domain::diagnosis::{DiseaseAssessment, Identification};
use sprout_domain::error::SproutError;

/// Runs the identification and disease models over raw image bytes.
pub trait PlantClassifier {
    /// Identify the plant on the image, returning the top candidates
    /// (best first).
    fn identify(
        &self,
        image: &[u8],
    ) -> impl Future<Output = Result<Identification, SproutError>> + Send;

    /// Assess plant health on the image. When `plant_type` names a plant
    /// with a dedicated disease model, that model is used; otherwise the
    /// general one.
    fn assess_disease(
        &self,
        image: &[u8],
        plant_type: Option<&str>,
    ) -> impl Future<Output = Result<DiseaseAssessment, SproutError>> + Send;
}

impl<T: PlantClassifier + Send + Sync> PlantClassifier for Arc<T> {
    fn identify(
        &self,
        image: &[u8],
    ) -> impl Future<Output = Result<Identification, SproutError>> + Send {
        (**self).identify(image)
    }

    fn assess_disease(
        &self,
        image: &[u8],
        plant_type: Option<&str>,
    ) -> impl Future<Output = Result<DiseaseAssessment, SproutError>> + Send {
        (**self).assess_disease(image, plant_type)
    }
}
