//! Database readiness gate library.

pub mod config;
pub mod gate;
pub mod observability;
pub mod probe;
pub mod util;

pub use config::GateConfig;
pub use gate::{Delay, GateError, ReadinessGate, TokioDelay};
pub use probe::{ConnectionProbe, ProbeError, RetryCause};
