//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional) + process environment
//!     → loader.rs (key lookup, dotenv)
//!     → validation.rs (every key present and non-blank)
//!     → schema.rs (typed addresses, integers, gas settings)
//!     → InitializerConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Loaded exactly once, before any chain interaction
//! - No partial success: one missing key in any group aborts the run
//! - Lookups go through a closure so the process environment is only one source

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from, ConfigError};
pub use schema::{ContractAddresses, DeploymentSettings, InitParams, InitializerConfig};
pub use validation::{SettingsGroup, ValidationError};
