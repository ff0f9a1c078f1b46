//! HTTP error response mapping.

use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use devreg_domain::error::{RegistryError, ValidationError};

use crate::envelope::{Envelope, INTERNAL_ERROR};

/// Maps a failed request to an error [`Envelope`].
///
/// The envelope `code` mirrors the HTTP status on both endpoints.
#[derive(Debug)]
pub enum ApiError {
    /// The operation itself failed.
    Registry(RegistryError),
    /// Cold-start configuration failed; nothing can be served.
    Unavailable,
    /// The id path segment could not be extracted.
    Path(PathRejection),
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Path(rejection)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Registry(err.into())
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Registry(RegistryError::Validation(ValidationError::MissingId)) => (
                StatusCode::NOT_FOUND,
                ValidationError::MissingId.to_string(),
            ),
            Self::Registry(RegistryError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Registry(RegistryError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Registry(RegistryError::Storage(err)) => {
                tracing::error!(error = %err, source = ?err.source(), "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
            Self::Unavailable => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string()),
            Self::Path(rejection) => (rejection.status(), rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        Envelope::error(status, i32::from(status.as_u16()), &message).into_response()
    }
}
