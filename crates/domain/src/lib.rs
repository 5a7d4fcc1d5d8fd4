//! # relaydash-domain
//!
//! Pure domain model for the relaydash console.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define the **session cookie** policy (name, lifetime, revocation)
//! - Define **statuses** of the relay server and of the push channel
//! - Define **telemetry** records (last sent frame, last upstream response)
//! - Decode hub invocations into typed **push events**
//! - Own the **dashboard state machine** and its presentation projection
//! - Define **passengers** as delivered by the external directory
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod dashboard;
pub mod passenger;
pub mod push;
pub mod session;
pub mod status;
pub mod telemetry;
pub mod view;
