//! Storage-specific error type wrapping sqlx errors.

use devreg_domain::error::RegistryError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to encode a record's attributes.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for RegistryError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
