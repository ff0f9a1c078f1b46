//! Process-wide registry configuration, resolved once at cold start.
//!
//! Resolution either yields a [`RegistryConfig`] or a [`ConfigError`]; the
//! caller keeps whichever it gets for the lifetime of the process and never
//! retries. Nothing here is mutated after resolution.

use std::error::Error;

/// Raw store settings, as read from the config file or environment.
#[derive(Debug, Clone, Default)]
pub struct StoreSettings {
    /// Region or identity of the target store.
    pub region: Option<String>,
    /// Table devices are stored in.
    pub table_name: Option<String>,
}

/// Permanent process-level fault recorded at cold start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("store session could not be established")]
    Session(#[source] Box<dyn Error + Send + Sync>),

    #[error("store region is not configured")]
    MissingRegion,

    #[error("device table name is not configured")]
    MissingTableName,
}

/// Resolved configuration: where devices live and the session to reach them.
#[derive(Debug)]
pub struct RegistryConfig<S> {
    region: String,
    table_name: String,
    session: S,
}

impl<S> RegistryConfig<S> {
    /// Validate `settings` together with the outcome of opening a store session.
    ///
    /// Checks run in order: session, region, table name. Empty strings count
    /// as missing. The failure, if any, is logged once here.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn resolve<E>(settings: StoreSettings, session: Result<S, E>) -> Result<Self, ConfigError>
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let resolved = Self::check(settings, session);
        if let Err(err) = &resolved {
            tracing::error!(error = %err, source = ?err.source(), "registry configuration failed");
        }
        resolved
    }

    fn check<E>(settings: StoreSettings, session: Result<S, E>) -> Result<Self, ConfigError>
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let session = session.map_err(|err| ConfigError::Session(err.into()))?;
        let region = non_empty(settings.region).ok_or(ConfigError::MissingRegion)?;
        let table_name = non_empty(settings.table_name).ok_or(ConfigError::MissingTableName)?;
        Ok(Self {
            region,
            table_name,
            session,
        })
    }

    /// Split into `(region, table_name, session)`.
    pub fn into_parts(self) -> (String, String, S) {
        (self.region, self.table_name, self.session)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
