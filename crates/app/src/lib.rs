//! # sprout-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ProfileRepository` — per-plant profile and settings documents
//!   - `HistoryStore` — append-only watering/moisture/disease history
//!   - `PlantClassifier` — image-based identification and disease inference
//!   - `EventPublisher` — publish domain events
//! - Own the **watering coordinator**: the single authority for pending
//!   watering commands and the automatic-watering decision
//! - Provide per-concern services that orchestrate domain objects without
//!   knowing *how* persistence or inference works
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `sprout-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod coordinator;
pub mod event_bus;
pub mod ports;
pub mod services;
