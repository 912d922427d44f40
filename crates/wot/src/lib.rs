//! # WoT
//!
//! Consume Web of Things devices through whichever protocol they speak.
//!
//! ## Overview
//!
//! A device describes itself with a Thing Description: a catalog of
//! properties, actions and events, each reachable through one or more links.
//! A consumed thing turns that catalog into plain calls (`get_property`,
//! `set_property`, `invoke_action`), picking a protocol client per link
//! scheme and reusing it for later calls.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────┐  description  ┌───────────────┐  scheme   ┌──────────┐  create  ┌────────────────┐
//! │   Wot   │──────────────▶│ ConsumedThing │──────────▶│ Servient │─────────▶│ ProtocolClient │
//! └─────────┘               └───────────────┘  (miss)   └──────────┘          └────────────────┘
//! ```
//!
//! - **Wot**: Thing factory; fetches and parses descriptions
//! - **ConsumedThing**: Resolves and caches one client per scheme
//! - **Servient**: Client factories by scheme, exposed thing records
//! - **ProtocolClient**: Read/write/invoke for one scheme (HTTP, file, ...)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wot::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let wot = Wot::new();
//!     let counter = wot.consume_description_uri("http://192.168.0.10/counter").await?;
//!
//!     let count: u64 = counter.get_property("count").await?.to_json()?;
//!     counter.invoke_action("increment", None).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config` (default), `yaml-config`: configuration file formats
//! - `json-log`: JSON log output
//! - `http-client` (default), `file-client` (default): built-in protocol clients

pub use wot_core as core;
pub use wot_runtime as runtime;
pub use wot_transport as transport;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use wot::prelude::*;
/// ```
pub mod prelude {
    // Entry points
    pub use wot_runtime::{ExposedThing, Servient, Wot, WotConfig};

    // Consuming things
    pub use wot_core::{
        ConsumedThing, Content, Interaction, InteractionType, Link, ThingDescription,
    };

    // Errors
    pub use wot_core::{ThingError, TransportError};
    pub use wot_runtime::RuntimeError;

    // Traits for custom protocol clients
    pub use wot_core::{ClientProvider, ProtocolClient, ProtocolClientFactory};
}
