//! Unified error types for the WoT core.
//!
//! [`TransportError`] is what a protocol client reports; [`ThingError`] is
//! what a consumed thing hands back to its caller. Transport failures travel
//! through [`ThingError::Transport`] untouched.

use thiserror::Error;

use crate::foundation::description::InteractionType;

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors raised by a protocol client while talking to a resource.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {href} - {reason}")]
    ConnectionFailed {
        /// The resource that could not be reached.
        href: String,
        /// Reason for failure.
        reason: String,
    },

    /// The remote end answered with a non-success status.
    #[error("{href} answered with status {status}: {body}")]
    Status {
        /// The resource that was addressed.
        href: String,
        /// Protocol status code.
        status: u16,
        /// Response body, lossily decoded.
        body: String,
    },

    /// The href cannot be handled by this client.
    #[error("invalid resource address '{href}': {reason}")]
    InvalidHref {
        /// The offending href.
        href: String,
        /// Reason for rejection.
        reason: String,
    },

    /// The client does not implement the requested operation.
    #[error("'{operation}' is not supported by the {scheme} client")]
    Unsupported {
        /// Scheme of the client.
        scheme: &'static str,
        /// Operation name.
        operation: &'static str,
    },

    /// The client has been stopped.
    #[error("{scheme} client is stopped")]
    Stopped {
        /// Scheme of the client.
        scheme: &'static str,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// Thing Errors
// =============================================================================

/// Errors surfaced by consumed thing operations.
#[derive(Debug, Clone, Error)]
pub enum ThingError {
    /// The named interaction does not exist with the requested type.
    #[error("cannot find {kind} '{interaction}' in '{thing}'")]
    InteractionNotFound {
        /// Name of the consumed thing.
        thing: String,
        /// Name that was looked up.
        interaction: String,
        /// Interaction type that was required.
        kind: InteractionType,
    },

    /// The interaction declares no links.
    #[error("{kind} '{interaction}' in '{thing}' has no links")]
    NoLinks {
        /// Name of the consumed thing.
        thing: String,
        /// Interaction without links.
        interaction: String,
        /// Interaction type.
        kind: InteractionType,
    },

    /// None of the candidate schemes yielded a client.
    #[error("no suitable client for '{interaction}' in '{thing}' (tried {schemes:?})")]
    NoSuitableClient {
        /// Name of the consumed thing.
        thing: String,
        /// Interaction being resolved.
        interaction: String,
        /// Candidate schemes in link order.
        schemes: Vec<String>,
    },

    /// Failure reported by the chosen protocol client.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ThingError {
    /// Returns true for failures detected before any transport call was made.
    pub fn is_resolution_error(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }
}

// =============================================================================
// Description Errors
// =============================================================================

/// Errors raised while turning a payload into a [`ThingDescription`](crate::ThingDescription).
#[derive(Debug, Clone, Error)]
pub enum DescriptionError {
    /// The payload is not a valid description.
    #[error("failed to parse thing description: {0}")]
    Parse(String),

    /// The description could not be serialized.
    #[error("failed to serialize thing description: {0}")]
    Serialize(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for consumed thing operations.
pub type ThingResult<T> = Result<T, ThingError>;

/// Result type for description parsing.
pub type DescriptionResult<T> = Result<T, DescriptionError>;
