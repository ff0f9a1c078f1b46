//! Device store adapter — devices in, raw records out.
//!
//! Translates between [`Device`] and the backend's [`Item`] on writes, and
//! normalizes read results so callers only see "a record" or "nothing".
//! Backend errors pass through untouched.

use devreg_domain::device::Device;
use devreg_domain::error::RegistryError;
use devreg_domain::id::DeviceId;
use devreg_domain::record::Item;

use crate::ports::ItemStore;

/// Device-level view over an [`ItemStore`] table.
pub struct DeviceStore<S> {
    backend: S,
    table: String,
}

impl<S: ItemStore> DeviceStore<S> {
    /// Bind `backend` to the table devices live in.
    pub fn new(backend: S, table: impl Into<String>) -> Self {
        Self {
            backend,
            table: table.into(),
        }
    }

    /// Name of the backing table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &S {
        &self.backend
    }

    /// Write `device` keyed by its id. Last writer wins.
    ///
    /// # Errors
    ///
    /// Returns the backend's error unchanged.
    pub async fn insert(&self, device: &Device) -> Result<(), RegistryError> {
        self.backend
            .put_item(&self.table, device.id.as_str(), Item::from(device))
            .await
    }

    /// Read the raw record stored under `id`.
    ///
    /// A record without attributes is reported as absent.
    ///
    /// # Errors
    ///
    /// Returns the backend's error unchanged.
    pub async fn fetch_by_id(&self, id: &DeviceId) -> Result<Option<Item>, RegistryError> {
        let item = self.backend.get_item(&self.table, id.as_str()).await?;
        Ok(item.filter(|item| !item.is_empty()))
    }
}
