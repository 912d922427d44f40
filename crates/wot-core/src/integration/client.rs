//! Protocol client capability system.
//!
//! A [`ProtocolClient`] speaks one wire scheme (`http`, `coap`, `file`, ...).
//! A [`ClientProvider`] answers which schemes it can serve and hands out
//! client instances; the servient in `wot-runtime` is the usual provider and
//! builds clients through registered [`ProtocolClientFactory`]s.
//!
//! ```rust,ignore
//! if provider.has_client_for("coap") {
//!     if let Some(client) = provider.get_client_for("coap") {
//!         let content = client.read_resource("coap://dev/temp").await?;
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::foundation::content::Content;
use crate::foundation::error::TransportResult;

// =============================================================================
// Protocol Client
// =============================================================================

/// Read/write/invoke primitives for one wire scheme.
///
/// Every method takes the absolute href of the target resource.
#[async_trait]
pub trait ProtocolClient: Send + Sync {
    /// The scheme this client speaks.
    fn scheme(&self) -> &str;

    /// Reads the resource at `href`.
    async fn read_resource(&self, href: &str) -> TransportResult<Content>;

    /// Replaces the resource at `href` with `content`.
    async fn write_resource(&self, href: &str, content: Content) -> TransportResult<()>;

    /// Invokes the resource at `href`, optionally passing a parameter.
    async fn invoke_resource(
        &self,
        href: &str,
        parameter: Option<Content>,
    ) -> TransportResult<Content>;

    /// Releases the client's resources.
    ///
    /// Returns false if the client was already stopped.
    fn stop(&self) -> bool {
        true
    }
}

/// A shared protocol client trait object.
pub type BoxedProtocolClient = Arc<dyn ProtocolClient>;

// =============================================================================
// Client Provider
// =============================================================================

/// Supplies protocol clients by scheme.
pub trait ClientProvider: Send + Sync {
    /// Returns true if a client can be supplied for `scheme`.
    fn has_client_for(&self, scheme: &str) -> bool;

    /// Supplies a client for `scheme`, or `None` if it cannot.
    fn get_client_for(&self, scheme: &str) -> Option<BoxedProtocolClient>;
}

/// A shared client provider trait object.
pub type BoxedClientProvider = Arc<dyn ClientProvider>;

// =============================================================================
// Client Factory
// =============================================================================

/// Creates protocol clients for one scheme.
pub trait ProtocolClientFactory: Send + Sync {
    /// The scheme served by clients from this factory.
    fn scheme(&self) -> &str;

    /// Creates a new client instance.
    fn create_client(&self) -> TransportResult<BoxedProtocolClient>;

    /// Called once when the factory is registered.
    fn init(&self) -> bool {
        true
    }

    /// Called when the owning servient shuts down.
    fn destroy(&self) -> bool {
        true
    }
}

/// A shared client factory trait object.
pub type BoxedClientFactory = Arc<dyn ProtocolClientFactory>;
