//! Client resolution for an interaction's links.
//!
//! [`resolve_client`] is a pure scan over the candidate links, a snapshot of
//! the per-thing client cache and the provider. It never touches the cache;
//! the caller inserts the client when the result is [`ClientOrigin::Provided`].
//!
//! The scan runs in two passes over the link schemes, both in link order:
//!
//! 1. **Cache** - the first scheme already cached wins.
//! 2. **Provider** - the first scheme the provider supports is chosen and a
//!    client is requested for it.
//!
//! Link order is the description author's preference, so a cached client only
//! wins over the provider when its scheme is one of this interaction's
//! candidates, and among several cached candidates the earliest link wins.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::foundation::description::{Interaction, Link};
use crate::foundation::error::{ThingError, ThingResult};
use crate::integration::client::{BoxedProtocolClient, ClientProvider};

/// Scheme-keyed protocol clients owned by one consumed thing.
pub type ClientCache = HashMap<String, BoxedProtocolClient>;

/// Where a resolved client came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientOrigin {
    /// Taken from the thing's client cache.
    Cached,
    /// Freshly supplied by the provider; not yet cached.
    Provided,
}

/// A client paired with the link it should be used with.
#[derive(Clone)]
pub struct ResolvedClient {
    /// The chosen client.
    pub client: BoxedProtocolClient,
    /// The link whose scheme selected the client.
    pub link: Link,
    /// Scheme of `link`.
    pub scheme: String,
    /// Where `client` came from.
    pub origin: ClientOrigin,
}

impl std::fmt::Debug for ResolvedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedClient")
            .field("link", &self.link)
            .field("scheme", &self.scheme)
            .field("origin", &self.origin)
            .finish()
    }
}

/// Picks a client for one of `links`.
///
/// `thing` and `interaction` only label the errors. `links` must already be
/// absolute; links without a scheme are never chosen.
///
/// # Errors
///
/// - [`ThingError::NoLinks`] if `links` is empty.
/// - [`ThingError::NoSuitableClient`] if no scheme is cached or supported, or
///   the provider supports the chosen scheme but yields no client.
pub fn resolve_client(
    thing: &str,
    interaction: &Interaction,
    links: &[Link],
    cache: &ClientCache,
    provider: &dyn ClientProvider,
) -> ThingResult<ResolvedClient> {
    if links.is_empty() {
        return Err(ThingError::NoLinks {
            thing: thing.to_string(),
            interaction: interaction.name.clone(),
            kind: interaction.interaction_type,
        });
    }

    let schemes: Vec<Option<String>> = links.iter().map(Link::scheme).collect();

    let cached = schemes.iter().enumerate().find_map(|(idx, scheme)| {
        let scheme = scheme.as_deref()?;
        cache.get(scheme).map(|client| (idx, client))
    });
    if let Some((idx, client)) = cached {
        let scheme = schemes[idx].clone().unwrap_or_default();
        debug!(thing = %thing, interaction = %interaction.name, scheme = %scheme, "Chose cached protocol client");
        return Ok(ResolvedClient {
            client: client.clone(),
            link: links[idx].clone(),
            scheme,
            origin: ClientOrigin::Cached,
        });
    }

    trace!(thing = %thing, interaction = %interaction.name, "No cached client for any link");

    let no_suitable_client = || ThingError::NoSuitableClient {
        thing: thing.to_string(),
        interaction: interaction.name.clone(),
        schemes: schemes.iter().flatten().cloned().collect(),
    };

    let (idx, scheme) = schemes
        .iter()
        .enumerate()
        .find_map(|(idx, scheme)| {
            let scheme = scheme.as_deref()?;
            provider.has_client_for(scheme).then_some((idx, scheme))
        })
        .ok_or_else(no_suitable_client)?;

    debug!(thing = %thing, interaction = %interaction.name, scheme = %scheme, "Chose protocol client from provider");

    let client = provider.get_client_for(scheme).ok_or_else(|| {
        debug!(scheme = %scheme, "Provider supports scheme but supplied no client");
        no_suitable_client()
    })?;

    Ok(ResolvedClient {
        client,
        link: links[idx].clone(),
        scheme: scheme.to_string(),
        origin: ClientOrigin::Provided,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::integration::testing::{CountingProvider, RecordingClient};

    fn property(links: &[&str]) -> (Interaction, Vec<Link>) {
        let interaction = links
            .iter()
            .fold(Interaction::property("temperature"), |ia, href| ia.with_link(*href));
        let links = interaction.links.clone();
        (interaction, links)
    }

    #[test]
    fn test_cached_scheme_beats_provider() {
        let (ia, links) = property(&["http://dev/temp", "coap://dev/temp"]);
        let provider = CountingProvider::supporting(&["http", "coap"]);
        let coap: BoxedProtocolClient = Arc::new(RecordingClient::new("coap"));
        let cache = ClientCache::from([("coap".to_string(), coap)]);

        let resolved = resolve_client("dev", &ia, &links, &cache, &provider).unwrap();

        assert_eq!(resolved.origin, ClientOrigin::Cached);
        assert_eq!(resolved.scheme, "coap");
        assert_eq!(resolved.link.href, "coap://dev/temp");
        assert_eq!(provider.lookups(), 0);
    }

    #[test]
    fn test_earliest_cached_link_wins() {
        let (ia, links) = property(&["mqtt://dev/temp", "coap://dev/temp", "http://dev/temp"]);
        let provider = CountingProvider::supporting(&[]);
        let http: BoxedProtocolClient = Arc::new(RecordingClient::new("http"));
        let coap: BoxedProtocolClient = Arc::new(RecordingClient::new("coap"));
        let cache = ClientCache::from([("http".to_string(), http), ("coap".to_string(), coap)]);

        let resolved = resolve_client("dev", &ia, &links, &cache, &provider).unwrap();

        assert_eq!(resolved.scheme, "coap");
        assert_eq!(resolved.link.href, "coap://dev/temp");
    }

    #[test]
    fn test_provider_fallback_in_link_order() {
        let (ia, links) = property(&["mqtt://dev/temp", "coap://dev/temp", "http://dev/temp"]);
        let provider = CountingProvider::supporting(&["http", "coap"]);

        let resolved = resolve_client("dev", &ia, &links, &ClientCache::new(), &provider).unwrap();

        assert_eq!(resolved.origin, ClientOrigin::Provided);
        assert_eq!(resolved.scheme, "coap");
        assert_eq!(resolved.client.scheme(), "coap");
        assert_eq!(provider.created(), vec!["coap".to_string()]);
    }

    #[test]
    fn test_empty_links() {
        let ia = Interaction::action("reboot");
        let provider = CountingProvider::supporting(&["http"]);

        let err = resolve_client("dev", &ia, &[], &ClientCache::new(), &provider).unwrap_err();

        assert!(matches!(err, ThingError::NoLinks { ref interaction, .. } if interaction == "reboot"));
        assert_eq!(provider.lookups(), 0);
    }

    #[test]
    fn test_no_supported_scheme() {
        let (ia, links) = property(&["http://dev/temp", "coap://dev/temp"]);
        let provider = CountingProvider::supporting(&["mqtt"]);

        let err = resolve_client("dev", &ia, &links, &ClientCache::new(), &provider).unwrap_err();

        match err {
            ThingError::NoSuitableClient { schemes, .. } => {
                assert_eq!(schemes, vec!["http".to_string(), "coap".to_string()]);
            }
            other => panic!("Expected NoSuitableClient, got {other:?}"),
        }
        assert!(provider.created().is_empty());
    }

    #[test]
    fn test_supported_scheme_without_instance() {
        let (ia, links) = property(&["http://dev/temp", "coap://dev/temp"]);
        let provider = CountingProvider::supporting(&["http", "coap"]).yielding_none();

        let err = resolve_client("dev", &ia, &links, &ClientCache::new(), &provider).unwrap_err();

        assert!(matches!(err, ThingError::NoSuitableClient { .. }));
        // Committed to http; coap is not tried.
        assert_eq!(provider.requested(), vec!["http".to_string()]);
    }

    #[test]
    fn test_relative_links_are_skipped() {
        let (ia, links) = property(&["temp", "coap://dev/temp"]);
        let provider = CountingProvider::supporting(&["coap"]);

        let resolved = resolve_client("dev", &ia, &links, &ClientCache::new(), &provider).unwrap();

        assert_eq!(resolved.link.href, "coap://dev/temp");
    }
}
