//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;

use devreg_app::ports::ItemStore;

use crate::state::AppState;

/// Build the `/api` sub-router.
///
/// `GET /devices` and `GET /devices/` exist so that a lookup without an id
/// gets the "no id" envelope instead of a bare router 404. Request bodies are
/// not size-capped so that every add outcome comes from the validator.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: ItemStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/devices",
            get(devices::get_without_id::<S>).post(devices::add::<S>),
        )
        .route("/devices/", get(devices::get_without_id::<S>))
        .route("/devices/{id}", get(devices::get::<S>))
        .layer(DefaultBodyLimit::disable())
}
