//! Integration layer - Protocol clients and the consumed thing.
//!
//! This module connects the data model to the outside world:
//! - Protocol client, provider and factory traits
//! - Client resolution over an interaction's links
//! - The consumed thing that caches clients and dispatches calls

pub mod client;
pub mod consumed;
pub mod resolve;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{
    BoxedClientFactory, BoxedClientProvider, BoxedProtocolClient, ClientProvider, ProtocolClient,
    ProtocolClientFactory,
};
pub use consumed::ConsumedThing;
pub use resolve::{ClientCache, ClientOrigin, ResolvedClient, resolve_client};
