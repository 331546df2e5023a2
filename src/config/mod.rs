//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs, --config)
//!     → DATABASE_URL / PORT overrides (loader.rs)
//!     → validation.rs (semantic checks)
//!     → SidecarConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload path
//! - All fields have defaults so the sidecar runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::SidecarConfig;
pub use schema::{DatabaseConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig};
