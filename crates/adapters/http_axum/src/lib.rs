//! # devreg-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the gateway surface: `POST /api/devices` and `GET /api/devices/{id}`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Render every outcome as a byte-stable, tab-indented JSON envelope with
//!   the matching status code
//! - Short-circuit every request to a 500 envelope when cold-start
//!   configuration failed
//!
//! ## Dependency rule
//! Depends on `devreg-app` (for port traits and services) and `devreg-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod envelope;
pub mod error;
pub mod router;
pub mod state;
