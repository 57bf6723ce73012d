//! # sprout-domain
//!
//! Pure domain model for the sprout plant-monitoring backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **watering commands** (pending pump actions and their sources)
//! - Define **moisture classification** (critical / low / normal bands)
//! - Define **plant profiles** and per-plant settings
//! - Define **history records** (watering, moisture, disease, identification)
//! - Define **diagnosis results** (plant identification, disease assessment)
//! - Define **events** (things that happened) and **notifications**
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod catalog;
pub mod command;
pub mod diagnosis;
pub mod event;
pub mod history;
pub mod moisture;
pub mod notification;
pub mod profile;
