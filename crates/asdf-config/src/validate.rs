//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Accepted `logging.format` values.
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

/// Validate a fully-merged configuration with `data_dir` already expanded.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_data_dir(config)?;
    validate_latest_query(config)?;
    validate_hooks(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_data_dir(config: &Config) -> ConfigResult<()> {
    if !config.data_dir.is_absolute() {
        return Err(ConfigError::ValidationError {
            field: "data_dir".to_owned(),
            message: format!(
                "'{}' must be an absolute path",
                config.data_dir.display()
            ),
        });
    }
    Ok(())
}

fn validate_latest_query(config: &Config) -> ConfigResult<()> {
    if config.default_latest_query.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "default_latest_query".to_owned(),
            message: "must not be empty".to_owned(),
        });
    }
    Ok(())
}

fn validate_hooks(config: &Config) -> ConfigResult<()> {
    for (event, command) in &config.hooks {
        if event.is_empty() || event.chars().any(char::is_whitespace) {
            return Err(ConfigError::ValidationError {
                field: format!("hooks.{event}"),
                message: "hook names must be non-empty and contain no whitespace".to_owned(),
            });
        }
        if command.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("hooks.{event}"),
                message: "hook command must not be empty".to_owned(),
            });
        }
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported format '{}'; expected one of: {}",
                config.logging.format,
                LOG_FORMATS.join(", ")
            ),
        });
    }
    if config.logging.level.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: "must not be empty".to_owned(),
        });
    }
    Ok(())
}
