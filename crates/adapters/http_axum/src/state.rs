//! Shared application state for axum handlers.

use std::sync::Arc;

use devreg_app::ports::ItemStore;
use devreg_app::services::device_service::{DeviceService, Registry};

use crate::error::ApiError;

/// Application state shared across all axum handlers.
///
/// Holds the cold-start [`Registry`] outcome, read-only for the life of the
/// process. `Clone` is implemented manually so the store type itself does not
/// need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<S> {
    /// Ready device service, or the configuration failure recorded at startup.
    pub registry: Arc<Registry<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<S> AppState<S>
where
    S: ItemStore + Send + Sync + 'static,
{
    /// Create a new application state from the cold-start outcome.
    pub fn new(registry: Registry<S>) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Borrow the device service, or fail when configuration did not resolve.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unavailable`] when cold-start configuration failed.
    pub fn service(&self) -> Result<&DeviceService<S>, ApiError> {
        (*self.registry).as_ref().map_err(|err| {
            tracing::debug!(error = %err, "rejecting request, registry unavailable");
            ApiError::Unavailable
        })
    }
}
