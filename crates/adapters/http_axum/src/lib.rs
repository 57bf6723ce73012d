//! # sprout-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **REST JSON API** the mobile client consumes
//!   (`/api/trigger-watering`, `/api/plant-profile`, `/api/identify-plant`, …)
//! - Serve the **device protocol** endpoints the microcontroller polls
//!   (`/api/should-water`, `/api/pump-status`, `/api/sensor-data`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! The device endpoints are deliberately conservative: `should-water`
//! answers with a plain-text `true`/`false` body because the firmware
//! string-matches the response.
//!
//! ## Dependency rule
//! Depends on `sprout-app` (for port traits and services) and
//! `sprout-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
