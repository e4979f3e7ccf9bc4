//! Observability subsystem.
//!
//! # Responsibilities
//! - Initialize structured logging before the gate starts probing
//!
//! # Design Decisions
//! - The gate's progress is observability only; log output never feeds back
//!   into retry decisions

pub mod logging;
