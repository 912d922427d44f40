//! Configuration schema definitions.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WotConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Protocol client settings.
    #[serde(default)]
    pub clients: ClientsConfig,
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature; falls back to `compact` otherwise.
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Line format.
    #[serde(default)]
    pub format: LogFormat,

    /// Destination.
    #[serde(default)]
    pub output: LogOutput,

    /// File to write to when `output = "file"`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Per-module level overrides, e.g. `wot_core = "debug"`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,

    /// Include thread ids.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include source file and line.
    #[serde(default)]
    pub file_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            file_path: None,
            filters: HashMap::new(),
            thread_ids: false,
            file_location: false,
        }
    }
}

// =============================================================================
// Clients
// =============================================================================

/// Protocol client settings, one section per scheme family.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientsConfig {
    /// `http` / `https` clients.
    #[serde(default)]
    pub http: HttpClientOptions,

    /// `file` client.
    #[serde(default)]
    pub file: FileClientOptions,
}

/// HTTP client options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientOptions {
    /// Register the `http` client factory.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Also register `https`.
    #[serde(default = "default_true")]
    pub https: bool,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// `Accept` header sent with every request.
    #[serde(default)]
    pub accept: Option<String>,
}

impl HttpClientOptions {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            https: true,
            timeout_ms: default_timeout_ms(),
            accept: None,
        }
    }
}

/// File client options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileClientOptions {
    /// Register the `file` client factory.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for FileClientOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    30000
}
