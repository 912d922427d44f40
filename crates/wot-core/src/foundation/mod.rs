//! Foundation layer - Data model and error types.
//!
//! This module contains the building blocks shared by every other layer:
//! - Thing Description model (interactions, links, schemes)
//! - Content payloads exchanged with protocol clients
//! - Error taxonomy for transports, descriptions and consumed things

pub mod content;
pub mod description;
pub mod error;

pub use content::{Content, DEFAULT_MEDIA_TYPE};
pub use description::{Interaction, InteractionType, Link, ThingDescription, extract_scheme};
pub use error::{
    DescriptionError, DescriptionResult, ThingError, ThingResult, TransportError,
    TransportResult,
};
