//! Diagnosis service — identification and disease checks over the
//! classifier port.

use sprout_domain::diagnosis::{DiseaseAssessment, Identification};
use sprout_domain::error::SproutError;
use sprout_domain::event::{Event, EventKind};
use sprout_domain::history::{DiseaseRecord, IdentificationRecord};
use sprout_domain::id::PlantId;

use crate::ports::{EventPublisher, HistoryStore, PlantClassifier};

/// Application service for the image endpoints.
pub struct DiagnosisService<CL, HS, EP> {
    classifier: CL,
    history: HS,
    events: EP,
}

impl<CL, HS, EP> DiagnosisService<CL, HS, EP>
where
    CL: PlantClassifier,
    HS: HistoryStore,
    EP: EventPublisher,
{
    /// Create a new service over the given classifier.
    pub fn new(classifier: CL, history: HS, events: EP) -> Self {
        Self {
            classifier,
            history,
            events,
        }
    }

    /// Identify the plant on an image and record the prediction list.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Inference`] when the model fails. A failed
    /// history append is logged, not propagated — the user still gets the
    /// predictions.
    pub async fn identify(
        &self,
        plant_id: PlantId,
        image: &[u8],
    ) -> Result<Identification, SproutError> {
        let identification = self.classifier.identify(image).await?;
        tracing::info!(
            plant_id = %plant_id,
            candidates = identification.predictions.len(),
            model = %identification.model,
            "plant identification finished"
        );

        if let Err(err) = self
            .history
            .record_identification(IdentificationRecord::new(
                plant_id,
                identification.predictions.clone(),
                identification.model.clone(),
            ))
            .await
        {
            tracing::warn!(error = %err, "failed to append identification history");
        }

        Ok(identification)
    }

    /// Run a disease check over an image and record the verdict.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Inference`] when the model fails. A failed
    /// history append is logged, not propagated.
    pub async fn check_disease(
        &self,
        plant_id: PlantId,
        plant_type: Option<String>,
        image: &[u8],
    ) -> Result<DiseaseAssessment, SproutError> {
        let assessment = self
            .classifier
            .assess_disease(image, plant_type.as_deref())
            .await?;
        tracing::info!(
            plant_id = %plant_id,
            status = assessment.status.as_str(),
            confidence = assessment.confidence,
            model = %assessment.model,
            "disease check finished"
        );

        if let Err(err) = self
            .history
            .record_disease(DiseaseRecord::new(
                plant_id.clone(),
                plant_type,
                assessment.status,
                assessment.confidence,
                assessment.model.clone(),
            ))
            .await
        {
            tracing::warn!(error = %err, "failed to append disease history");
        }

        if let Err(err) = self
            .events
            .publish(Event::new(EventKind::DiseaseChecked {
                plant_id,
                status: assessment.status,
                confidence: assessment.confidence,
            }))
            .await
        {
            tracing::debug!(error = %err, "event publish failed");
        }

        Ok(assessment)
    }
}
