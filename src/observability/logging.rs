//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Select output format (pretty for development, JSON for production)
//! - Honor `RUST_LOG` over the configured filter

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::{LogFormat, ObservabilityConfig};

/// Initialize the logging subsystem.
///
/// `RUST_LOG` takes precedence over the configured filter so operators can
/// raise verbosity without editing config.
pub fn init(config: &ObservabilityConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}
