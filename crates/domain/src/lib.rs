//! # devreg-domain
//!
//! Pure domain model for the device registry.
//!
//! ## Responsibilities
//! - Foundational types: the typed device identifier and error conventions
//! - Define the **Device** record and its canonical JSON shape
//! - Parse and validate untyped request bodies into a [`device::Device`]
//! - Define the key-value **record** shape a device is stored as, and the
//!   lossless mapping between the two
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod device;
pub mod record;
