//! Structured logging initialisation.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DEFAULT_LOG_FILTER;

static INIT: Once = Once::new();

/// Installs the global `tracing` subscriber once per process.
///
/// `filter` uses `EnvFilter` directive syntax; an invalid directive falls
/// back to `info`. Later calls are ignored.
pub fn init_tracing(filter: &str) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let installed = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init();

        if installed.is_ok() {
            tracing::info!(filter, "tracing initialised");
        }
    });
}
