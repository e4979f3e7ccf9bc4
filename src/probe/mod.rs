//! Database connectivity probing.
//!
//! # Data Flow
//! ```text
//! ReadinessGate (gate/mod.rs)
//!     → ConnectionProbe::attempt("default")
//!     → driver connect + trivial query (postgres.rs)
//!     → Ok | ProbeError::Retryable | ProbeError::Fatal
//! ```
//!
//! # Design Decisions
//! - One connection attempt per call; the probe never retries internally
//! - Driver error taxonomies collapse into Retryable/Fatal at this boundary;
//!   the gate never sees driver types
//! - Retryable carries a cause tag for logging only, not for control flow

pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

/// Why a probe attempt failed transiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCause {
    /// The server is not accepting TCP connections yet.
    ServerUnreachable,
    /// The server is listening but the target database is not serving queries.
    DatabaseNotReady,
}

impl std::fmt::Display for RetryCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetryCause::ServerUnreachable => write!(f, "server unreachable"),
            RetryCause::DatabaseNotReady => write!(f, "database not ready"),
        }
    }
}

/// Outcome of a failed probe attempt.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Transient startup-race failure; the caller may retry after a pause.
    #[error("database unavailable ({cause}): {source}")]
    Retryable {
        cause: RetryCause,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other failure. Never retried.
    #[error("probe failed: {0}")]
    Fatal(Box<dyn std::error::Error + Send + Sync>),
}

impl ProbeError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProbeError::Retryable { .. })
    }
}

/// A single connectivity check against a named logical connection.
#[async_trait]
pub trait ConnectionProbe {
    /// Attempt one connection to the logical connection `connection`.
    ///
    /// Succeeds only if the database accepted the connection and served a
    /// trivial query.
    async fn attempt(&self, connection: &str) -> Result<(), ProbeError>;
}
