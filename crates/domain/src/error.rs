//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`SproutError`]
//! via `From`. Adapters wrap their library errors (`reqwest`, `serde_json`, …)
//! in a boxed source so the domain stays free of IO crate types.

/// Top-level error for the sprout workspace.
#[derive(Debug, thiserror::Error)]
pub enum SproutError {
    /// A domain invariant was violated by caller input.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A requested record does not exist.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// The profile/history store failed.
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Model inference failed.
    #[error("inference error: {0}")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Violations of domain invariants.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A plant identifier must be a non-empty string.
    #[error("plant id must not be empty")]
    EmptyPlantId,

    /// Pump durations of zero seconds would be no-ops on the device.
    #[error("watering duration must be greater than zero")]
    ZeroDuration,

    /// A plant profile needs a plant type before it is useful.
    #[error("plant type must not be empty")]
    EmptyPlantType,

    /// The chosen plant type is not in the supported catalog.
    #[error("unsupported plant type: {0}")]
    UnsupportedPlantType(String),

    /// Moisture readings are percentages.
    #[error("moisture must be between 0 and 100, got {0}")]
    MoistureOutOfRange(u8),

    /// The image endpoints need an `image` part in the upload.
    #[error("no image file provided")]
    MissingImage,
}

/// A record lookup that came back empty where a caller required a result.
#[derive(Debug, thiserror::Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    /// Human-readable entity kind, e.g. `"PlantProfile"`.
    pub entity: &'static str,
    /// The identifier that failed to resolve.
    pub id: String,
}
