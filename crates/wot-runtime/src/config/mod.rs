//! Configuration module for the WoT runtime.
//!
//! This module provides layered configuration loading and validation for
//! logging and protocol client settings.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    ClientsConfig, FileClientOptions, HttpClientOptions, LogFormat, LogLevel, LogOutput,
    LoggingConfig, WotConfig,
};
pub use validation::validate_config;
