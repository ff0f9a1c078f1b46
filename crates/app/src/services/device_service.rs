//! Device service — the add and lookup use-cases.

use devreg_domain::device::Device;
use devreg_domain::error::{NotFoundError, RegistryError, ValidationError};
use devreg_domain::id::DeviceId;

use crate::config::{ConfigError, RegistryConfig, StoreSettings};
use crate::ports::ItemStore;
use crate::store::DeviceStore;

/// Outcome of cold-start resolution: a ready service or the recorded fault.
pub type Registry<S> = Result<DeviceService<S>, ConfigError>;

/// Application service for adding and looking up devices.
///
/// Holds no per-request state; every operation makes at most one store call
/// and never retries.
pub struct DeviceService<S> {
    store: DeviceStore<S>,
    region: String,
}

impl<S: ItemStore> DeviceService<S> {
    /// Create a new service from resolved configuration.
    pub fn new(config: RegistryConfig<S>) -> Self {
        let (region, table_name, session) = config.into_parts();
        Self {
            store: DeviceStore::new(session, table_name),
            region,
        }
    }

    /// Resolve configuration and build the service, keeping a failure as-is.
    pub fn provision<E>(settings: StoreSettings, session: Result<S, E>) -> Registry<S>
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        RegistryConfig::resolve(settings, session).map(Self::new)
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn table(&self) -> &str {
        self.store.table()
    }

    /// Validate a raw request body and store the resulting device.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] when the body is rejected (the
    /// store is not touched), or the store's error when the write fails.
    #[tracing::instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn add_device(&self, body: &[u8]) -> Result<Device, RegistryError> {
        let device = Device::parse(body)?;
        self.store.insert(&device).await?;
        tracing::debug!(device_id = %device.id, "device stored");
        Ok(device)
    }

    /// Look up a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingId`] for an empty id,
    /// [`RegistryError::NotFound`] when no record exists, or
    /// [`RegistryError::Storage`] when the read fails or the record cannot
    /// be turned back into a device.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: &str) -> Result<Device, RegistryError> {
        if id.is_empty() {
            return Err(ValidationError::MissingId.into());
        }
        let id = DeviceId::new(id);
        let Some(item) = self.store.fetch_by_id(&id).await? else {
            return Err(NotFoundError { id }.into());
        };
        Ok(Device::try_from(item)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devreg_domain::record::{AttributeValue, Item};
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct InMemoryItemStore {
        items: Mutex<HashMap<String, Item>>,
        calls: AtomicUsize,
    }

    impl ItemStore for InMemoryItemStore {
        fn put_item(
            &self,
            _table: &str,
            key: &str,
            item: Item,
        ) -> impl Future<Output = Result<(), RegistryError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.items.lock().unwrap().insert(key.to_string(), item);
            async { Ok(()) }
        }

        fn get_item(
            &self,
            _table: &str,
            key: &str,
        ) -> impl Future<Output = Result<Option<Item>, RegistryError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = self.items.lock().unwrap().get(key).cloned();
            async { Ok(result) }
        }
    }

    struct FailingItemStore;

    impl ItemStore for FailingItemStore {
        async fn put_item(&self, _table: &str, _key: &str, _item: Item) -> Result<(), RegistryError> {
            Err(RegistryError::Storage("throttled".into()))
        }

        async fn get_item(&self, _table: &str, _key: &str) -> Result<Option<Item>, RegistryError> {
            Err(RegistryError::Storage("access denied".into()))
        }
    }

    fn settings() -> StoreSettings {
        StoreSettings {
            region: Some("eu-west-1".to_string()),
            table_name: Some("devices".to_string()),
        }
    }

    fn make_service() -> DeviceService<InMemoryItemStore> {
        DeviceService::provision(settings(), Ok::<_, ConfigError>(InMemoryItemStore::default()))
            .unwrap()
    }

    const VALID: &str = r#"{"id":"id_test","deviceModel":"deviceModel_test","name":"name_test","note":"note_test","serial":"serial_test"}"#;

    #[tokio::test]
    async fn should_add_then_get_same_device() {
        let svc = make_service();

        let added = svc.add_device(VALID.as_bytes()).await.unwrap();
        let fetched = svc.get_device("id_test").await.unwrap();

        assert_eq!(added, fetched);
        assert_eq!(fetched.device_model, "deviceModel_test");
    }

    #[tokio::test]
    async fn should_not_touch_store_when_body_rejected() {
        let svc = make_service();

        let result = svc.add_device(b"").await;
        assert!(matches!(
            result,
            Err(RegistryError::Validation(ValidationError::EmptyBody))
        ));

        let result = svc.add_device(br#"{"id":"1"}"#).await;
        assert!(matches!(
            result,
            Err(RegistryError::Validation(ValidationError::MissingFields(_)))
        ));

        assert_eq!(svc.store.backend().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_report_missing_id_without_store_call() {
        let svc = make_service();
        let result = svc.get_device("").await;
        assert!(matches!(
            result,
            Err(RegistryError::Validation(ValidationError::MissingId))
        ));
        assert_eq!(svc.store.backend().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_return_not_found_when_device_missing() {
        let svc = make_service();
        let result = svc.get_device("id_test_no").await;
        assert!(matches!(result, Err(RegistryError::NotFound(err)) if err.id.as_str() == "id_test_no"));
    }

    #[tokio::test]
    async fn should_surface_unreadable_record_as_storage_error() {
        let svc = make_service();
        let mut item = Item::new();
        item.insert("id", AttributeValue::S("broken".to_string()));
        svc.store.backend().items.lock().unwrap().insert("broken".to_string(), item);

        let result = svc.get_device("broken").await;
        assert!(matches!(result, Err(RegistryError::Storage(_))));
    }

    #[tokio::test]
    async fn should_propagate_backend_errors() {
        let svc = DeviceService::provision(settings(), Ok::<_, ConfigError>(FailingItemStore)).unwrap();

        let added = svc.add_device(VALID.as_bytes()).await;
        assert!(matches!(added, Err(RegistryError::Storage(_))));

        let fetched = svc.get_device("id_test").await;
        assert!(matches!(fetched, Err(RegistryError::Storage(_))));
    }

    #[test]
    fn should_keep_configuration_failure() {
        let registry = DeviceService::<InMemoryItemStore>::provision(
            StoreSettings {
                region: Some("eu-west-1".to_string()),
                table_name: None,
            },
            Ok::<_, ConfigError>(InMemoryItemStore::default()),
        );
        assert!(matches!(registry, Err(ConfigError::MissingTableName)));
    }
}
