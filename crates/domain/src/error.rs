//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RegistryError`] via `#[from]`. Display strings of the client-facing
//! variants are the exact messages returned to callers.

use std::fmt;

use crate::id::DeviceId;
use crate::record::RecordError;

/// Base error for every registry operation.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The backing store failed. The source is opaque to callers.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<RecordError> for RegistryError {
    fn from(err: RecordError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Client input that cannot be accepted. Detected locally, never touches storage.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("No inputs provided, please provide inputs in json format.")]
    EmptyBody,

    #[error("Wrong format: Inputs must be a valid json.")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Following fields are not provided: {0}")]
    MissingFields(MissingFields),

    #[error("No ID Field Provided")]
    MissingId,
}

/// Required fields found empty, in canonical field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(Vec<&'static str>);

impl MissingFields {
    #[must_use]
    pub fn new(fields: Vec<&'static str>) -> Self {
        Self(fields)
    }

    #[must_use]
    pub fn fields(&self) -> &[&'static str] {
        &self.0
    }
}

// Every field keeps its trailing ", ", including the last one.
impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|field| write!(f, "{field}, "))
    }
}

/// The store was reachable but holds no record under the requested key.
#[derive(Debug, thiserror::Error)]
#[error("Desired device with provided id was not founded")]
pub struct NotFoundError {
    pub id: DeviceId,
}
