//! Startup readiness gate.
//!
//! # States
//! - Waiting: probing the database, not yet ready
//! - Ready: a probe succeeded; the gate has returned
//!
//! # State Transitions
//! ```text
//! Waiting → Waiting: retryable probe failure (pause for the interval first)
//! Waiting → Ready: probe success (terminal)
//! ```
//!
//! # Design Decisions
//! - Unbounded retries by default; an external supervisor owns the timeout
//! - Fixed inter-attempt delay, no exponential backoff
//! - Only the two known warm-up failure classes are masked; anything else
//!   propagates and aborts startup

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::schema::GateSettings;
use crate::probe::{ConnectionProbe, ProbeError};

/// Inter-attempt pause. Injectable so tests run without real time.
#[async_trait]
pub trait Delay {
    async fn pause(&self, interval: Duration);
}

/// Production delay: sleep on the tokio timer.
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn pause(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

/// Errors surfaced by [`ReadinessGate::wait`].
#[derive(Debug, Error)]
pub enum GateError {
    /// Bounded mode only: every allowed attempt failed transiently.
    #[error("database still unavailable after {attempts} attempts")]
    Exhausted { attempts: u32 },

    /// The probe failed in a way the gate does not mask.
    #[error(transparent)]
    Probe(ProbeError),
}

/// Blocks startup until the database accepts connections and serves queries.
pub struct ReadinessGate<P, D> {
    probe: P,
    delay: D,
    connection: String,
    interval: Duration,
    max_attempts: Option<u32>,
}

impl<P, D> ReadinessGate<P, D>
where
    P: ConnectionProbe,
    D: Delay,
{
    pub fn new(probe: P, delay: D, settings: &GateSettings) -> Self {
        Self {
            probe,
            delay,
            connection: settings.connection.clone(),
            interval: Duration::from_millis(settings.interval_ms),
            max_attempts: settings.max_attempts,
        }
    }

    /// Probe until the database is ready.
    ///
    /// Returns as soon as one probe succeeds. A retryable failure pauses for
    /// the configured interval and probes again; any other failure returns
    /// immediately. With `max_attempts` unset this never gives up on its own.
    pub async fn wait(&self) -> Result<(), GateError> {
        tracing::info!(connection = %self.connection, "Waiting for database");

        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            match self.probe.attempt(&self.connection).await {
                Ok(()) => {
                    tracing::info!(
                        connection = %self.connection,
                        attempts,
                        "Database available"
                    );
                    return Ok(());
                }
                Err(ProbeError::Retryable { cause, source }) => {
                    tracing::warn!(
                        connection = %self.connection,
                        attempt = attempts,
                        cause = %cause,
                        error = %source,
                        "Database unavailable, retrying after pause"
                    );
                    if let Some(max) = self.max_attempts {
                        if attempts >= max {
                            return Err(GateError::Exhausted { attempts });
                        }
                    }
                    self.delay.pause(self.interval).await;
                }
                Err(fatal) => return Err(GateError::Probe(fatal)),
            }
        }
    }
}
