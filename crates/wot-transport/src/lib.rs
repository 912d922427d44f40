//! # WoT Transport
//!
//! Protocol client implementations for consumed things.
//!
//! This crate provides concrete implementations of the [`wot_core::ProtocolClient`]
//! capability, one per wire scheme, each paired with a
//! [`wot_core::ProtocolClientFactory`] that a servient registers by scheme.
//!
//! ## Features
//!
//! - `http-client` (default): `http` and `https` clients over `reqwest`
//! - `file-client` (default): `file` client over `tokio::fs`
//! - `full`: All clients
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  ConsumedThing      │  (resolves a client per link scheme)
//! ├─────────────────────┤
//! │  wot-core           │  (ProtocolClient / factory traits)
//! ├─────────────────────┤
//! │  wot-transport      │  <- This crate (implementations)
//! ├─────────────────────┤
//! │  Network / disk     │
//! └─────────────────────┘
//! ```
//!
//! ## Client Implementations
//!
//! | Scheme | Client | read | write | invoke |
//! |--------|--------|------|-------|--------|
//! | `http`, `https` | [`HttpClient`] | `GET` | `PUT` | `POST` |
//! | `file` | [`FileClient`] | read file | write file | unsupported |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wot_core::ProtocolClientFactory;
//! use wot_transport::{HttpClientConfig, HttpClientFactory};
//!
//! let factory = HttpClientFactory::http(HttpClientConfig::default());
//! let client = factory.create_client()?;
//! let content = client.read_resource("http://192.168.0.10/counter/count").await?;
//! ```

// Client implementations (feature-gated)
#[cfg(feature = "http-client")]
pub mod http;

#[cfg(feature = "file-client")]
pub mod file;

// Client re-exports
#[cfg(feature = "http-client")]
pub use http::{HttpClient, HttpClientConfig, HttpClientFactory};

#[cfg(feature = "file-client")]
pub use file::{FileClient, FileClientFactory};
