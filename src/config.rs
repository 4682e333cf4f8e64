//! Environment-driven configuration.

use secrecy::SecretString;

/// Variable holding the webhook shared secret.
pub const WEBHOOK_SECRET_VAR: &str = "TASKLINK_WEBHOOK_SECRET";
/// Variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "TASKLINK_DATABASE_URL";
/// Variable holding the tracing filter directive.
pub const LOG_FILTER_VAR: &str = "TASKLINK_LOG";
/// Filter used when [`LOG_FILTER_VAR`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings for the synchronization services.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    webhook_secret: Option<SecretString>,
    database_url: Option<SecretString>,
    log_filter: String,
}

impl SyncConfig {
    /// Loads configuration from the process environment, reading a `.env`
    /// file first when one exists.
    #[must_use]
    pub fn from_env() -> Self {
        // A missing .env file is the normal production case.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            webhook_secret: read(WEBHOOK_SECRET_VAR).map(SecretString::from),
            database_url: read(DATABASE_URL_VAR).map(SecretString::from),
            log_filter: read(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
        }
    }

    /// Returns the webhook shared secret, if configured.
    #[must_use]
    pub const fn webhook_secret(&self) -> Option<&SecretString> {
        self.webhook_secret.as_ref()
    }

    /// Returns the database URL, if configured.
    #[must_use]
    pub const fn database_url(&self) -> Option<&SecretString> {
        self.database_url.as_ref()
    }

    /// Returns the tracing filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}
