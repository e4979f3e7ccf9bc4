//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GateConfig (validated, immutable)
//!
//! Without a file:
//!     DATABASE_URL env var
//!     → single "default" connection with default gate settings
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ConnectionConfig;
pub use schema::GateConfig;
pub use schema::GateSettings;
pub use schema::ObservabilityConfig;
