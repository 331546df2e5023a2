//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::SidecarConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the store connection string.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Environment variable holding the HTTP listen port.
pub const ENV_PORT: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, reason: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, reason } => write!(f, "Invalid {}: {}", var, reason),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration: defaults, then the optional TOML file, then the environment.
pub fn load_config(path: Option<&Path>) -> Result<SidecarConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_file(path)?,
        None => SidecarConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn read_file(path: &Path) -> Result<SidecarConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay `DATABASE_URL` and `PORT` onto `config`.
///
/// Empty values count as unset, so a blank variable in a compose file keeps the default.
pub fn apply_env_overrides<F>(config: &mut SidecarConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(ENV_DATABASE_URL) {
        config.database.url = url;
    }

    if let Some(port) = non_empty(ENV_PORT) {
        config.listener.port = port.trim().parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::Env {
                var: ENV_PORT,
                reason: format!("'{}' is not a valid port ({})", port, e),
            }
        })?;
    }

    Ok(())
}
