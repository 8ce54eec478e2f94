//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CoordinatorConfig (validated, immutable)
//!     → read once by the entry point at startup
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - No hot reload: the signal set is fixed for the process lifetime

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::CoordinatorConfig;
pub use schema::DrainConfig;
pub use schema::ObservabilityConfig;
pub use schema::SignalConfig;
