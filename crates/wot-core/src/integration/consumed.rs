//! Consumed thing: the client-side handle of a remote Thing.
//!
//! A [`ConsumedThing`] looks up interactions in its [`ThingDescription`],
//! picks a protocol client for one of the interaction's links and forwards
//! the call. Clients are cached per scheme for the life of the thing, so a
//! transport proven usable once is reused by every later interaction that
//! lists it.
//!
//! # Example
//!
//! ```rust,ignore
//! let thing = ConsumedThing::new(servient.clone(), description);
//!
//! let temperature = thing.get_property("temperature").await?;
//! thing.set_property("level", Content::json(&5)?).await?;
//! thing.invoke_action("reboot", None).await?;
//! ```
//!
//! # Concurrency
//!
//! Resolution never awaits: the scan runs under a read lock on the cache and
//! the insert after a provider fallback takes the write lock. Two tasks using
//! the same scheme for the first time may both obtain a client from the
//! provider; the later insert replaces the earlier one.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, trace};

use crate::foundation::content::Content;
use crate::foundation::description::{Interaction, InteractionType, ThingDescription};
use crate::foundation::error::{DescriptionResult, ThingError, ThingResult};
use crate::integration::client::BoxedClientProvider;
use crate::integration::resolve::{ClientCache, ClientOrigin, ResolvedClient, resolve_client};

/// Client-side handle for operating a remote Thing.
pub struct ConsumedThing {
    /// Thing name, copied from the description.
    name: String,
    /// Interaction catalog.
    description: Arc<ThingDescription>,
    /// Source of protocol clients on cache misses.
    provider: BoxedClientProvider,
    /// Protocol clients by scheme. Append-only.
    clients: RwLock<ClientCache>,
}

impl ConsumedThing {
    /// Creates a consumed thing for `description`, drawing clients from `provider`.
    pub fn new(provider: BoxedClientProvider, description: impl Into<Arc<ThingDescription>>) -> Self {
        let description = description.into();
        let name = description.name.clone();
        debug!(thing = %name, "Created consumed thing");
        Self {
            name,
            description,
            provider,
            clients: RwLock::new(ClientCache::new()),
        }
    }

    /// Returns the thing name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parsed description.
    pub fn thing_description(&self) -> &ThingDescription {
        &self.description
    }

    /// Returns the description in its serialized object form.
    pub fn description(&self) -> DescriptionResult<Value> {
        self.description.to_value()
    }

    /// Returns the schemes that currently have a cached client, sorted.
    pub fn cached_schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.clients.read().keys().cloned().collect();
        schemes.sort();
        schemes
    }

    /// Looks up an interaction by name and kind.
    ///
    /// # Errors
    ///
    /// [`ThingError::InteractionNotFound`] if no interaction of `kind` is named `name`.
    pub fn find_interaction(&self, name: &str, kind: InteractionType) -> ThingResult<&Interaction> {
        self.description
            .find_interaction(name, kind)
            .ok_or_else(|| ThingError::InteractionNotFound {
                thing: self.name.clone(),
                interaction: name.to_string(),
                kind,
            })
    }

    /// Picks a protocol client for `interaction`, caching it when it came
    /// from the provider.
    ///
    /// The returned link carries the absolute href to call.
    pub fn resolve_client_for(&self, interaction: &Interaction) -> ThingResult<ResolvedClient> {
        let links = self.description.resolved_links(interaction);
        let resolved = {
            let cache = self.clients.read();
            resolve_client(&self.name, interaction, &links, &cache, self.provider.as_ref())?
        };

        if resolved.origin == ClientOrigin::Provided {
            trace!(thing = %self.name, scheme = %resolved.scheme, "Caching protocol client");
            self.clients
                .write()
                .insert(resolved.scheme.clone(), resolved.client.clone());
        }

        Ok(resolved)
    }

    /// Reads a property.
    pub async fn get_property(&self, name: &str) -> ThingResult<Content> {
        debug!(thing = %self.name, property = %name, "Resolving property for read");
        let property = self.find_interaction(name, InteractionType::Property)?;
        let ResolvedClient { client, link, .. } = self.resolve_client_for(property)?;

        info!(href = %link.href, "Reading property");
        Ok(client.read_resource(&link.href).await?)
    }

    /// Writes a property.
    pub async fn set_property(&self, name: &str, value: Content) -> ThingResult<()> {
        debug!(thing = %self.name, property = %name, "Resolving property for write");
        let property = self.find_interaction(name, InteractionType::Property)?;
        let ResolvedClient { client, link, .. } = self.resolve_client_for(property)?;

        info!(href = %link.href, media_type = %value.media_type, "Writing property");
        Ok(client.write_resource(&link.href, value).await?)
    }

    /// Invokes an action, optionally with a parameter.
    pub async fn invoke_action(&self, name: &str, parameter: Option<Content>) -> ThingResult<Content> {
        debug!(thing = %self.name, action = %name, "Resolving action");
        let action = self.find_interaction(name, InteractionType::Action)?;
        let ResolvedClient { client, link, .. } = self.resolve_client_for(action)?;

        info!(href = %link.href, "Invoking action");
        Ok(client.invoke_resource(&link.href, parameter).await?)
    }
}

impl std::fmt::Debug for ConsumedThing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsumedThing")
            .field("name", &self.name)
            .field("interactions", &self.description.interactions.len())
            .field("cached_schemes", &self.cached_schemes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::foundation::error::TransportError;
    use crate::integration::client::BoxedProtocolClient;
    use crate::integration::testing::{Call, CountingProvider, RecordingClient};

    fn sensor() -> ThingDescription {
        ThingDescription::new("sensor")
            .with_interaction(
                Interaction::property("temperature")
                    .with_link("http://dev/temp")
                    .with_link("coap://dev/temp"),
            )
            .with_interaction(
                Interaction::property("level")
                    .with_member("writable", json!(true))
                    .with_link("coap://dev/level"),
            )
            .with_interaction(Interaction::action("reboot"))
            .with_interaction(Interaction::action("temperature").with_link("coap://dev/calibrate"))
    }

    fn consume(provider: &Arc<CountingProvider>) -> ConsumedThing {
        ConsumedThing::new(provider.clone(), sensor())
    }

    #[tokio::test]
    async fn test_reads_through_first_supported_scheme() {
        let provider = Arc::new(CountingProvider::supporting(&["coap"]));
        let thing = consume(&provider);

        let content = thing.get_property("temperature").await.unwrap();

        assert_eq!(content.text(), "coap:coap://dev/temp");
        assert_eq!(provider.requested(), vec!["coap".to_string()]);
        assert_eq!(
            provider.client(0).calls(),
            vec![Call::Read("coap://dev/temp".to_string())]
        );
        assert_eq!(thing.cached_schemes(), vec!["coap".to_string()]);
    }

    #[tokio::test]
    async fn test_no_supported_scheme_leaves_cache_empty() {
        let provider = Arc::new(CountingProvider::supporting(&[]));
        let thing = consume(&provider);

        let err = thing.get_property("temperature").await.unwrap_err();

        match err {
            ThingError::NoSuitableClient { thing: name, interaction, schemes } => {
                assert_eq!(name, "sensor");
                assert_eq!(interaction, "temperature");
                assert_eq!(schemes, vec!["http".to_string(), "coap".to_string()]);
            }
            other => panic!("Expected NoSuitableClient, got {other:?}"),
        }
        assert!(thing.cached_schemes().is_empty());
    }

    #[tokio::test]
    async fn test_action_without_links() {
        let provider = Arc::new(CountingProvider::supporting(&["http", "coap"]));
        let thing = consume(&provider);

        let err = thing.invoke_action("reboot", None).await.unwrap_err();

        assert!(matches!(err, ThingError::NoLinks { .. }));
        assert_eq!(provider.lookups(), 0);
    }

    #[tokio::test]
    async fn test_second_write_uses_cache() {
        let provider = Arc::new(CountingProvider::supporting(&["coap"]));
        let thing = consume(&provider);

        thing
            .set_property("level", Content::json(&5).unwrap())
            .await
            .unwrap();
        thing
            .set_property("level", Content::json(&10).unwrap())
            .await
            .unwrap();

        assert_eq!(provider.lookups(), 1);
        assert_eq!(provider.requested().len(), 1);
        let calls = provider.client(0).calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1],
            Call::Write("coap://dev/level".to_string(), Content::json(&10).unwrap())
        );
    }

    #[tokio::test]
    async fn test_missing_property_never_queries_provider() {
        let provider = Arc::new(CountingProvider::supporting(&["http", "coap"]));
        let thing = consume(&provider);

        let err = thing.get_property("missing").await.unwrap_err();

        assert!(matches!(
            err,
            ThingError::InteractionNotFound { ref interaction, kind: InteractionType::Property, .. }
                if interaction == "missing"
        ));
        assert_eq!(provider.lookups(), 0);
        assert!(provider.requested().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_kind_is_not_found() {
        let provider = Arc::new(CountingProvider::supporting(&["coap"]));
        let thing = consume(&provider);

        let err = thing.invoke_action("level", None).await.unwrap_err();

        assert!(matches!(
            err,
            ThingError::InteractionNotFound { kind: InteractionType::Action, .. }
        ));
    }

    #[tokio::test]
    async fn test_cached_scheme_preferred_over_provider() {
        let provider = Arc::new(CountingProvider::supporting(&["http", "coap"]));
        let thing = consume(&provider);
        let coap = Arc::new(RecordingClient::new("coap"));
        thing
            .clients
            .write()
            .insert("coap".to_string(), coap.clone() as BoxedProtocolClient);

        thing.get_property("temperature").await.unwrap();

        assert_eq!(coap.calls(), vec![Call::Read("coap://dev/temp".to_string())]);
        assert_eq!(provider.lookups(), 0);
    }

    #[tokio::test]
    async fn test_cache_shared_across_interactions() {
        let provider = Arc::new(CountingProvider::supporting(&["coap"]));
        let thing = consume(&provider);

        thing.get_property("temperature").await.unwrap();
        thing
            .invoke_action("temperature", Some(Content::json(&json!({ "offset": 1 })).unwrap()))
            .await
            .unwrap();

        assert_eq!(provider.requested().len(), 1);
        let calls = provider.client(0).calls();
        assert!(matches!(&calls[1], Call::Invoke(href, Some(_)) if href == "coap://dev/calibrate"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let provider = Arc::new(CountingProvider::supporting(&["http", "coap"]).with_failing_clients());
        let thing = consume(&provider);

        let err = thing.get_property("temperature").await.unwrap_err();

        assert!(matches!(
            err,
            ThingError::Transport(TransportError::Status { status: 503, ref href, .. })
                if href == "http://dev/temp"
        ));
        assert!(!err.is_resolution_error());
        assert_eq!(provider.created(), vec!["http".to_string()]);
        // The client stays cached even though the call failed.
        assert_eq!(thing.cached_schemes(), vec!["http".to_string()]);
    }

    #[tokio::test]
    async fn test_relative_links_resolved_against_base() {
        let provider = Arc::new(CountingProvider::supporting(&["http"]));
        let description = ThingDescription::new("counter")
            .with_base("http://192.168.0.10/counter/")
            .with_interaction(Interaction::property("count").with_link("count"));
        let thing = ConsumedThing::new(provider.clone(), description);

        thing.get_property("count").await.unwrap();

        assert_eq!(
            provider.client(0).calls(),
            vec![Call::Read("http://192.168.0.10/counter/count".to_string())]
        );
    }

    #[tokio::test]
    async fn test_description_is_serialized_catalog() {
        let provider = Arc::new(CountingProvider::supporting(&[]));
        let thing = consume(&provider);

        let value = thing.description().unwrap();

        assert_eq!(value["name"], "sensor");
        assert_eq!(value["interactions"][1]["writable"], true);
        assert_eq!(thing.name(), "sensor");
    }

    #[tokio::test]
    async fn test_concurrent_first_use_keeps_one_cached_client() {
        let provider = Arc::new(CountingProvider::supporting(&["coap"]));
        let thing = consume(&provider);

        let (a, b) = futures::join!(
            thing.get_property("temperature"),
            thing.set_property("level", Content::json(&1).unwrap())
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(thing.cached_schemes(), vec!["coap".to_string()]);
    }
}
