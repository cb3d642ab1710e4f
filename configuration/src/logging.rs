use tracing_subscriber::{fmt, EnvFilter};

use crate::LoggingConfig;

/// Installs the global tracing subscriber. `RUST_LOG` wins over the
/// configured filter so operators can raise verbosity without touching
/// the config file. Safe to call once per process.
pub fn setup_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
