//! Profile store port — persistence for plant profile documents.

use std::future::Future;
use std::sync::Arc;

use sprout_domain::error::SproutError;
use sprout_domain::id::PlantId;
use sprout_domain::profile::PlantProfile;

/// Repository for per-plant profile documents.
///
/// A missing profile is an expected state everywhere in the system, so
/// lookups return `Option` rather than an error.
pub trait ProfileRepository {
    /// Fetch the profile for a plant, if one has been created.
    fn get(
        &self,
        plant_id: PlantId,
    ) -> impl Future<Output = Result<Option<PlantProfile>, SproutError>> + Send;

    /// Create or replace the profile document keyed by its plant id.
    fn upsert(
        &self,
        profile: PlantProfile,
    ) -> impl Future<Output = Result<PlantProfile, SproutError>> + Send;
}

impl<T: ProfileRepository + Send + Sync> ProfileRepository for Arc<T> {
    fn get(
        &self,
        plant_id: PlantId,
    ) -> impl Future<Output = Result<Option<PlantProfile>, SproutError>> + Send {
        (**self).get(plant_id)
    }

    fn upsert(
        &self,
        profile: PlantProfile,
    ) -> impl Future<Output = Result<PlantProfile, SproutError>> + Send {
        (**self).upsert(profile)
    }
}
