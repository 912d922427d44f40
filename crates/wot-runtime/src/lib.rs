//! WoT Runtime - Servient, thing factory, configuration and logging.
//!
//! This crate provides:
//! - The servient (`Servient`): client factories by scheme and the exposed thing registry
//! - The thing factory (`Wot`): consumes descriptions into `ConsumedThing`s
//! - Layered configuration (`config`)
//! - Logging configuration (`logging`)
//!
//! # Automatic Client Registration
//!
//! [`Servient::from_config`] registers a client factory for every enabled
//! client, based on cargo features and the `clients` configuration section:
//!
//! - `http-client` (default): `http` and `https`
//! - `file-client` (default): `file`
//!
//! ```ignore
//! use wot_runtime::Wot;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let wot = Wot::new();
//!     let thing = wot.consume_description_uri("http://192.168.0.10/td").await?;
//!     println!("{}", thing.get_property("count").await?.text());
//!     Ok(())
//! }
//! ```
//!
//! # Custom Clients
//!
//! Any [`wot_core::ProtocolClientFactory`] can be added to the servient:
//!
//! ```ignore
//! let wot = Wot::builder().build()?;
//! wot.servient().add_client_factory(CoapClientFactory::new());
//! ```

pub mod config;
pub mod error;
pub mod exposed;
pub mod logging;
pub mod servient;
pub mod wot;

// Re-exports
pub use config::{ConfigError, ConfigLoader, ConfigResult, WotConfig, load_config};
pub use error::{RuntimeError, RuntimeResult};
pub use exposed::ExposedThing;
pub use logging::LoggingBuilder;
pub use servient::{Servient, ServientStats};
pub use wot::{Wot, WotBuilder};

// Re-export tracing for downstream logging
pub use tracing;
