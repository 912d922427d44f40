//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;
use wot_core::{DescriptionError, TransportError};

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A description URI has no usable scheme.
    #[error("Invalid description URI: {0}")]
    InvalidUri(String),

    /// No client factory is registered for a scheme.
    #[error("No client available for scheme '{0}'")]
    ClientUnavailable(String),

    /// Fetching a description failed.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A description could not be parsed.
    #[error("Description error: {0}")]
    Description(#[from] DescriptionError),

    /// A thing with the same name is already registered.
    #[error("Thing already exists: {0}")]
    ThingExists(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
