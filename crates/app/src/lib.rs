//! # devreg-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** the key-value backend must implement
//!   (driven/outbound port): `ItemStore` — put a record, get a record by key
//! - Wrap that capability in the device-level store adapter (`DeviceStore`)
//! - Resolve process-wide configuration once at cold start (`RegistryConfig`)
//!   and keep the outcome as a typed result
//! - Define the **driving/inbound** use-cases: `DeviceService` — add a device
//!   from a raw request body, look a device up by id
//!
//! ## Dependency rule
//! Depends on `devreg-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod config;
pub mod ports;
pub mod services;
pub mod store;
