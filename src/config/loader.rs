//! Configuration loading from the environment.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::InitializerConfig;
use crate::config::validation::{collect_required, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The dotenv file exists but could not be read.
    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// One or more required keys are missing or blank.
    #[error("{}. Aborting", join(.0))]
    Missing(Vec<ValidationError>),

    /// A present value could not be converted to its type.
    #[error("invalid value for parameter {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

fn join(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Load the dotenv file (if present) into the process environment, then build
/// the configuration from it.
///
/// A missing env file is not an error; variables already set in the
/// environment take precedence over the file.
pub fn load_config(env_file: &Path) -> Result<InitializerConfig, ConfigError> {
    match dotenvy::from_path(env_file) {
        Ok(()) => tracing::debug!(path = %env_file.display(), "Loaded env file"),
        Err(e) if e.not_found() => {
            tracing::debug!(path = %env_file.display(), "No env file, using process environment")
        }
        Err(e) => return Err(e.into()),
    }

    load_from(|key| std::env::var(key).ok())
}

/// Build and validate the configuration from an arbitrary key lookup.
pub fn load_from<F>(lookup: F) -> Result<InitializerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = collect_required(lookup).map_err(ConfigError::Missing)?;
    InitializerConfig::from_raw(&raw)
}
