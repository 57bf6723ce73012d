//! Storage-specific error type wrapping transport and mapping failures.

use sprout_domain::error::SproutError;

/// Errors originating from the Firestore storage layer.
#[derive(Debug, thiserror::Error)]
pub enum FirestoreError {
    /// The HTTP request itself failed.
    #[error("transport error")]
    Http(#[from] reqwest::Error),

    /// Firestore answered with a non-success status.
    #[error("firestore responded with status {status}")]
    Api {
        status: u16,
        /// Response body, kept for the logs.
        message: String,
    },

    /// Failed to serialize or deserialize a document body.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// A document came back without a field the mapping requires.
    #[error("malformed document: {0}")]
    Decode(String),
}

impl From<FirestoreError> for SproutError {
    fn from(err: FirestoreError) -> Self {
        Self::Storage(Box::new(err))
    }
}
