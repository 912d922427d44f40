//! Configuration validation.

use super::error::{ConfigError, ConfigResult};
use super::schema::{LogOutput, WotConfig};

/// Checks a loaded configuration for values that cannot work.
pub fn validate_config(config: &WotConfig) -> ConfigResult<()> {
    let http = &config.clients.http;
    if http.enabled && http.timeout_ms == 0 {
        return Err(ConfigError::validation(
            "clients.http.timeout_ms must be greater than zero",
        ));
    }

    if let Some(module) = config.logging.filters.keys().find(|m| m.trim().is_empty()) {
        return Err(ConfigError::validation(format!(
            "logging.filters contains an empty module name: '{module}'"
        )));
    }

    if config.logging.output == LogOutput::File && config.logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "logging.file_path is required when logging.output is 'file'",
        ));
    }

    Ok(())
}
