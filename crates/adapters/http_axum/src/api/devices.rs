//! JSON handlers for devices.

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use devreg_app::ports::ItemStore;
use devreg_domain::device::Device;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the add endpoint.
pub enum AddResponse {
    Created(Device),
}

impl IntoResponse for AddResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(device) => Envelope::created(&device).into_response(),
        }
    }
}

/// Possible responses from the lookup endpoint.
pub enum GetResponse {
    Ok(Device),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(device) => Envelope::found(&device).into_response(),
        }
    }
}

/// `POST /api/devices`
///
/// The body is taken as raw bytes so that empty and malformed payloads reach
/// the validator instead of being rejected by an extractor.
pub async fn add<S>(State(state): State<AppState<S>>, body: Bytes) -> Result<AddResponse, ApiError>
where
    S: ItemStore + Send + Sync + 'static,
{
    let service = state.service()?;
    let device = service.add_device(&body).await?;
    Ok(AddResponse::Created(device))
}

/// `GET /api/devices/{id}`
///
/// A segment that fails to decode is answered with an error envelope rather
/// than the extractor's plain-text rejection.
pub async fn get<S>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<GetResponse, ApiError>
where
    S: ItemStore + Send + Sync + 'static,
{
    let service = state.service()?;
    let Path(id) = id?;
    let device = service.get_device(&id).await?;
    Ok(GetResponse::Ok(device))
}

/// `GET /api/devices` — lookup with no id segment.
pub async fn get_without_id<S>(State(state): State<AppState<S>>) -> Result<GetResponse, ApiError>
where
    S: ItemStore + Send + Sync + 'static,
{
    let service = state.service()?;
    let device = service.get_device("").await?;
    Ok(GetResponse::Ok(device))
}
