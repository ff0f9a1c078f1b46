//! Key-value store port — the narrow put/get capability of the backend.

use std::future::Future;

use devreg_domain::error::RegistryError;
use devreg_domain::record::Item;

/// A key-value backend holding [`Item`]s in named tables.
///
/// Implementations report every failure as [`RegistryError::Storage`].
pub trait ItemStore {
    /// Write `item` under `key`, replacing any record already stored there.
    fn put_item(
        &self,
        table: &str,
        key: &str,
        item: Item,
    ) -> impl Future<Output = Result<(), RegistryError>> + Send;

    /// Read the record stored under `key`. An absent key is `Ok(None)`.
    fn get_item(
        &self,
        table: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Item>, RegistryError>> + Send;
}
