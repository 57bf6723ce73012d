//! # sprout-adapter-firestore
//!
//! Firestore persistence adapter speaking the [Firestore REST
//! API](https://firebase.google.com/docs/firestore/use-rest-api) via
//! `reqwest`.
//!
//! ## Responsibilities
//! - Implement the `ProfileRepository` and `HistoryStore` port traits
//! - Map between domain types and Firestore's typed value documents
//! - Own the HTTP client, project/database addressing, and auth header
//!
//! ## Collections
//! - `plant_profiles` — one document per plant, keyed by plant id
//! - `watering_history`, `sensor_data`, `disease_checks`,
//!   `plant_identifications` — append collections with auto ids
//!
//! Authentication is a bearer token taken from configuration; exchanging a
//! service-account key for that token is a deployment concern.
//!
//! ## Dependency rule
//! Depends on `sprout-app` (for port traits) and `sprout-domain` (for domain
//! types). The `app` and `domain` crates must never reference this adapter.

mod client;
mod error;
mod history_store;
mod profile_repo;
mod value;

pub use client::{Config, FirestoreClient};
pub use error::FirestoreError;
pub use history_store::FirestoreHistoryStore;
pub use profile_repo::FirestoreProfileRepository;
