//! `SQLite` implementation of [`ItemStore`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use devreg_app::ports::ItemStore;
use devreg_domain::error::RegistryError;
use devreg_domain::record::Item;

use crate::error::StorageError;

/// Wrapper for converting database rows into a domain [`Item`].
struct Wrapper(Item);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Item> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let attributes: String = row.try_get("attributes")?;
        let item = serde_json::from_str(&attributes).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        Ok(Self(item))
    }
}

const UPSERT: &str = "INSERT INTO items (table_name, item_key, attributes) VALUES (?, ?, ?) \
     ON CONFLICT (table_name, item_key) DO UPDATE SET attributes = excluded.attributes";
const SELECT_BY_KEY: &str = "SELECT attributes FROM items WHERE table_name = ? AND item_key = ?";

/// `SQLite`-backed key-value store.
///
/// Writes are unconditional upserts; concurrent writers to the same key
/// resolve as last writer wins.
pub struct SqliteItemStore {
    pool: SqlitePool,
}

impl SqliteItemStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ItemStore for SqliteItemStore {
    fn put_item(
        &self,
        table: &str,
        key: &str,
        item: Item,
    ) -> impl Future<Output = Result<(), RegistryError>> + Send {
        let pool = self.pool.clone();
        let table = table.to_string();
        let key = key.to_string();
        async move {
            let attributes = serde_json::to_string(&item).map_err(StorageError::from)?;

            sqlx::query(UPSERT)
                .bind(table)
                .bind(key)
                .bind(attributes)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn get_item(
        &self,
        table: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Item>, RegistryError>> + Send {
        let pool = self.pool.clone();
        let table = table.to_string();
        let key = key.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_KEY)
                .bind(table)
                .bind(key)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use devreg_domain::device::Device;
    use devreg_domain::record::AttributeValue;

    async fn setup() -> SqliteItemStore {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteItemStore::new(db.pool().clone())
    }

    fn test_device() -> Device {
        Device::builder()
            .id("id_test")
            .device_model("deviceModel_test")
            .name("name_test")
            .note("note_test")
            .serial("serial_test")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_put_and_get_item_when_valid() {
        let store = setup().await;
        let device = test_device();

        store
            .put_item("devices", "id_test", Item::from(&device))
            .await
            .unwrap();

        let item = store.get_item("devices", "id_test").await.unwrap().unwrap();
        assert_eq!(Device::try_from(item).unwrap(), device);
    }

    #[tokio::test]
    async fn should_return_none_when_key_not_found() {
        let store = setup().await;
        let result = store.get_item("devices", "missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_overwrite_when_key_exists() {
        let store = setup().await;
        let mut device = test_device();
        store
            .put_item("devices", "id_test", Item::from(&device))
            .await
            .unwrap();

        device.note = "replaced".to_string();
        store
            .put_item("devices", "id_test", Item::from(&device))
            .await
            .unwrap();

        let item = store.get_item("devices", "id_test").await.unwrap().unwrap();
        assert_eq!(
            item.get("note").and_then(AttributeValue::as_s),
            Some("replaced")
        );
    }

    #[tokio::test]
    async fn should_scope_keys_by_table() {
        let store = setup().await;
        store
            .put_item("devices", "id_test", Item::from(&test_device()))
            .await
            .unwrap();

        let result = store.get_item("archive", "id_test").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_surface_corrupt_rows_as_storage_error() {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        sqlx::query("INSERT INTO items (table_name, item_key, attributes) VALUES ('devices', 'bad', 'not json')")
            .execute(db.pool())
            .await
            .unwrap();
        let store = SqliteItemStore::new(db.pool().clone());

        let result = store.get_item("devices", "bad").await;
        assert!(matches!(result, Err(RegistryError::Storage(_))));
    }
}
