//! # WoT Core
//!
//! Client-side building blocks for operating Web of Things devices.
//!
//! A device publishes a Thing Description: its properties, actions and events,
//! each reachable through one or more links (`http://…`, `coap://…`, …). This
//! crate parses that catalog and lets a caller read, write and invoke
//! interactions without knowing which protocol the device speaks.
//!
//! ## Architecture Layers
//!
//! ### Foundation Layer
//!
//! - **Description Model**: [`ThingDescription`], [`Interaction`], [`Link`]
//! - **Payloads**: [`Content`]
//! - **Errors**: [`TransportError`], [`ThingError`], [`DescriptionError`]
//!
//! ### Integration Layer
//!
//! - **Client Capabilities**: [`ProtocolClient`], [`ClientProvider`], [`ProtocolClientFactory`]
//! - **Resolution**: [`resolve_client`]
//! - **Consumed Thing**: [`ConsumedThing`]
//!
//! ## Call Flow
//!
//! ```text
//! ┌────────────┐  name   ┌───────────────┐  links   ┌──────────────┐
//! │   Caller   │────────▶│ ConsumedThing │─────────▶│ client cache │
//! └────────────┘         └───────────────┘          └──────┬───────┘
//!                                │                   miss  │
//!                                │ href            ┌───────▼────────┐
//!                                ▼                 │ ClientProvider │
//!                        ┌────────────────┐        └────────────────┘
//!                        │ ProtocolClient │
//!                        └────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use wot_core::{ConsumedThing, Content, ThingDescription};
//!
//! let description = ThingDescription::from_json_str(&text)?;
//! let thing = ConsumedThing::new(provider, description);
//!
//! let value: f64 = thing.get_property("temperature").await?.to_json()?;
//! ```

// Architectural layers
pub mod foundation;
pub mod integration;

// Re-export foundation types
pub use foundation::{
    Content, DEFAULT_MEDIA_TYPE, DescriptionError, DescriptionResult, Interaction,
    InteractionType, Link, ThingDescription, ThingError, ThingResult, TransportError,
    TransportResult, extract_scheme,
};

// Re-export integration types
pub use integration::{
    BoxedClientFactory, BoxedClientProvider, BoxedProtocolClient, ClientCache, ClientOrigin,
    ClientProvider, ConsumedThing, ProtocolClient, ProtocolClientFactory, ResolvedClient,
    resolve_client,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::foundation::*;
    pub use super::integration::{ClientProvider, ConsumedThing, ProtocolClient};
}
