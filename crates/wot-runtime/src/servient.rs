//! The servient: client factories by scheme plus the exposed thing registry.
//!
//! Consumed things draw protocol clients from the servient through the
//! [`ClientProvider`] capability. Every lookup builds a fresh client from the
//! registered factory; caching is the consumed thing's job.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};
use wot_core::{BoxedClientFactory, BoxedProtocolClient, ClientProvider, ProtocolClientFactory};

use crate::config::ClientsConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::exposed::ExposedThing;

/// Registry of protocol client factories and exposed things.
#[derive(Default)]
pub struct Servient {
    /// Client factories by lower-case scheme.
    client_factories: RwLock<HashMap<String, BoxedClientFactory>>,
    /// Exposed things by name.
    things: RwLock<HashMap<String, Arc<ExposedThing>>>,
}

impl Servient {
    /// Creates a servient with no factories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a servient with the built-in client factories enabled in `config`.
    #[allow(unused_variables)]
    pub fn from_config(config: &ClientsConfig) -> Self {
        let servient = Self::new();

        #[cfg(feature = "http-client")]
        if config.http.enabled {
            use wot_transport::{HttpClientConfig, HttpClientFactory};

            let mut http_config = HttpClientConfig::default().with_timeout(config.http.timeout());
            if let Some(accept) = &config.http.accept {
                http_config = http_config.with_accept(accept.clone());
            }
            if config.http.https {
                servient.add_client_factory(HttpClientFactory::https(http_config.clone()));
            }
            servient.add_client_factory(HttpClientFactory::http(http_config));
        }

        #[cfg(feature = "file-client")]
        if config.file.enabled {
            servient.add_client_factory(wot_transport::FileClientFactory::new());
        }

        info!(schemes = ?servient.client_schemes(), "Servient ready");
        servient
    }

    /// Registers a client factory under its scheme, replacing any previous one.
    ///
    /// Returns false if the factory failed to initialize; it is not registered then.
    pub fn add_client_factory<F>(&self, factory: F) -> bool
    where
        F: ProtocolClientFactory + 'static,
    {
        self.add_boxed_client_factory(Arc::new(factory))
    }

    /// Registers an already shared client factory.
    pub fn add_boxed_client_factory(&self, factory: BoxedClientFactory) -> bool {
        let scheme = factory.scheme().to_ascii_lowercase();
        if !factory.init() {
            warn!(scheme = %scheme, "Client factory failed to initialize");
            return false;
        }

        if let Some(previous) = self.client_factories.write().insert(scheme.clone(), factory) {
            previous.destroy();
            debug!(scheme = %scheme, "Replaced client factory");
        } else {
            debug!(scheme = %scheme, "Registered client factory");
        }
        true
    }

    /// Returns the schemes with a registered factory, sorted.
    pub fn client_schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.client_factories.read().keys().cloned().collect();
        schemes.sort();
        schemes
    }

    /// Registers an exposed thing under its name.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::ThingExists`] if the name is taken.
    pub fn add_thing(&self, thing: ExposedThing) -> RuntimeResult<Arc<ExposedThing>> {
        let mut things = self.things.write();
        if things.contains_key(thing.name()) {
            return Err(RuntimeError::ThingExists(thing.name().to_string()));
        }

        let name = thing.name().to_string();
        let thing = Arc::new(thing);
        things.insert(name.clone(), Arc::clone(&thing));
        info!(thing = %name, "Registered exposed thing");
        Ok(thing)
    }

    /// Gets an exposed thing by name.
    pub fn get_thing(&self, name: &str) -> Option<Arc<ExposedThing>> {
        self.things.read().get(name).cloned()
    }

    /// Returns the names of all exposed things, sorted.
    pub fn thing_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.things.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Destroys every registered factory and forgets the exposed things.
    pub fn shutdown(&self) {
        let factories: Vec<_> = self.client_factories.write().drain().collect();
        info!("Shutting down {} client factory(ies)", factories.len());
        for (scheme, factory) in factories {
            if !factory.destroy() {
                warn!(scheme = %scheme, "Client factory failed to shut down cleanly");
            }
        }
        self.things.write().clear();
    }

    /// Returns statistics about the servient.
    pub fn stats(&self) -> ServientStats {
        ServientStats {
            client_factories: self.client_factories.read().len(),
            things: self.things.read().len(),
        }
    }
}

impl ClientProvider for Servient {
    fn has_client_for(&self, scheme: &str) -> bool {
        self.client_factories
            .read()
            .contains_key(&scheme.to_ascii_lowercase())
    }

    fn get_client_for(&self, scheme: &str) -> Option<BoxedProtocolClient> {
        let factory = self
            .client_factories
            .read()
            .get(&scheme.to_ascii_lowercase())
            .cloned()?;

        match factory.create_client() {
            Ok(client) => {
                debug!(scheme = %scheme, "Created protocol client");
                Some(client)
            }
            Err(e) => {
                warn!(scheme = %scheme, error = %e, "Failed to create protocol client");
                None
            }
        }
    }
}

impl std::fmt::Debug for Servient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Servient")
            .field("client_schemes", &self.client_schemes())
            .field("things", &self.thing_names())
            .finish()
    }
}

/// Servient statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServientStats {
    /// Number of registered client factories.
    pub client_factories: usize,
    /// Number of exposed things.
    pub things: usize,
}
