//! The thing factory.
//!
//! [`Wot`] turns descriptions into [`ConsumedThing`]s backed by its
//! servient's client factories, and registers exposed thing records.
//!
//! ```rust,ignore
//! use wot_runtime::Wot;
//!
//! let wot = Wot::builder().config_file("wot.toml").build()?;
//! let thing = wot.consume_description_uri("http://192.168.0.10/td").await?;
//! let count = thing.get_property("count").await?;
//! ```

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use wot_core::{
    BoxedClientProvider, ClientProvider, ConsumedThing, ThingDescription, extract_scheme,
};

use crate::config::{ConfigLoader, WotConfig};
use crate::error::{RuntimeError, RuntimeResult};
use crate::exposed::ExposedThing;
use crate::logging;
use crate::servient::Servient;

/// Entry point for consuming and registering things.
#[derive(Debug, Clone)]
pub struct Wot {
    servient: Arc<Servient>,
}

impl Wot {
    /// Creates a factory with automatic configuration loading.
    ///
    /// Falls back to default settings if the configuration cannot be loaded.
    pub fn new() -> Self {
        let config = ConfigLoader::new().load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config ({e}), using defaults");
            WotConfig::default()
        });
        Self::from_config(&config)
    }

    /// Creates a builder for custom configuration.
    pub fn builder() -> WotBuilder {
        WotBuilder::new()
    }

    /// Initializes logging and builds the servient from `config`.
    pub fn from_config(config: &WotConfig) -> Self {
        logging::init_from_config(&config.logging);
        info!(
            log_level = %config.logging.level,
            log_format = ?config.logging.format,
            "WoT initialized from configuration"
        );
        Self::with_servient(Servient::from_config(&config.clients))
    }

    /// Wraps an already populated servient.
    pub fn with_servient(servient: impl Into<Arc<Servient>>) -> Self {
        Self {
            servient: servient.into(),
        }
    }

    /// Returns the servient backing this factory.
    pub fn servient(&self) -> &Arc<Servient> {
        &self.servient
    }

    fn provider(&self) -> BoxedClientProvider {
        self.servient.clone()
    }

    /// Fetches the description at `uri` with a one-shot client for its scheme.
    ///
    /// The client is stopped once the fetch completes, whether or not it succeeded.
    pub async fn fetch_description(&self, uri: &str) -> RuntimeResult<ThingDescription> {
        let scheme = extract_scheme(uri).ok_or_else(|| RuntimeError::InvalidUri(uri.to_string()))?;
        let client = self
            .servient
            .get_client_for(&scheme)
            .ok_or_else(|| RuntimeError::ClientUnavailable(scheme.clone()))?;

        debug!(uri = %uri, scheme = %scheme, "Fetching thing description");
        let fetched = client.read_resource(uri).await;
        client.stop();
        let content = fetched?;

        if !content.is_json() {
            warn!(
                uri = %uri,
                media_type = %content.media_type,
                "Thing description is not served as application/json, parsing anyway"
            );
        }

        Ok(ThingDescription::from_json_slice(&content.body)?)
    }

    /// Fetches and consumes the description at `uri`.
    pub async fn consume_description_uri(&self, uri: &str) -> RuntimeResult<ConsumedThing> {
        let description = self.fetch_description(uri).await?;
        Ok(self.consume(description))
    }

    /// Consumes a description given in its JSON object form.
    pub fn consume_description(&self, description: Value) -> RuntimeResult<ConsumedThing> {
        let description = ThingDescription::from_value(description)?;
        Ok(self.consume(description))
    }

    /// Consumes an already parsed description.
    pub fn consume(&self, description: impl Into<Arc<ThingDescription>>) -> ConsumedThing {
        let thing = ConsumedThing::new(self.provider(), description);
        info!(thing = %thing.name(), "Consumed thing");
        thing
    }

    /// Registers a new exposed thing named `name`.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::ThingExists`] if the name is taken.
    pub fn create_thing(&self, name: &str) -> RuntimeResult<Arc<ExposedThing>> {
        self.servient.add_thing(ExposedThing::new(name))
    }

    /// Fetches the description at `uri` and registers it as an exposed thing.
    pub async fn create_from_description_uri(&self, uri: &str) -> RuntimeResult<Arc<ExposedThing>> {
        let description = self.fetch_description(uri).await?;
        self.servient
            .add_thing(ExposedThing::from_description(description))
    }

    /// Registers a description given in its JSON object form as an exposed thing.
    pub fn create_from_description(&self, description: Value) -> RuntimeResult<Arc<ExposedThing>> {
        let description = ThingDescription::from_value(description)?;
        self.servient
            .add_thing(ExposedThing::from_description(description))
    }
}

impl Default for Wot {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a [`Wot`] with custom configuration.
pub struct WotBuilder {
    config_loader: ConfigLoader,
}

impl WotBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new(),
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges a programmatic base configuration.
    pub fn merge(mut self, config: WotConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Loads the configuration and builds the factory.
    pub fn build(self) -> RuntimeResult<Wot> {
        let config = self.config_loader.load()?;
        Ok(Wot::from_config(&config))
    }
}

impl Default for WotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn lamp() -> Value {
        json!({
            "@context": ["http://w3c.github.io/wot/w3c-wot-td-context.jsonld"],
            "name": "lamp",
            "interactions": [
                {
                    "@type": ["Property"],
                    "name": "on",
                    "links": [{ "href": "http://lamp/on", "mediaType": "application/json" }]
                }
            ]
        })
    }

    #[test]
    fn test_consume_description() {
        let wot = Wot::with_servient(Servient::new());
        let thing = wot.consume_description(lamp()).unwrap();

        assert_eq!(thing.name(), "lamp");
        assert_eq!(thing.description().unwrap()["name"], json!("lamp"));
        assert!(thing.cached_schemes().is_empty());
    }

    #[test]
    fn test_consume_invalid_description() {
        let wot = Wot::with_servient(Servient::new());
        let err = wot.consume_description(json!({ "interactions": [] })).unwrap_err();
        assert!(matches!(err, RuntimeError::Description(_)));
    }

    #[test]
    fn test_create_thing_rejects_duplicates() {
        let wot = Wot::with_servient(Servient::new());
        wot.create_thing("fan").unwrap();
        wot.create_from_description(lamp()).unwrap();

        let err = wot.create_from_description(lamp()).unwrap_err();
        assert!(matches!(err, RuntimeError::ThingExists(name) if name == "lamp"));
        assert_eq!(
            wot.servient().thing_names(),
            vec!["fan".to_string(), "lamp".to_string()]
        );
    }

    #[tokio::test]
    async fn test_uri_without_scheme() {
        let wot = Wot::with_servient(Servient::new());
        let err = wot.consume_description_uri("lamp.json").await.unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidUri(_)));
    }

    #[tokio::test]
    async fn test_uri_without_client() {
        let wot = Wot::with_servient(Servient::new());
        let err = wot
            .consume_description_uri("coap://lamp/td")
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::ClientUnavailable(scheme) if scheme == "coap"));
    }

    #[cfg(feature = "file-client")]
    mod file {
        use url::Url;
        use wot_core::Content;
        use wot_transport::FileClientFactory;

        use super::*;

        fn file_url(path: &Path) -> String {
            Url::from_file_path(path).unwrap().to_string()
        }

        fn file_wot() -> Wot {
            let servient = Servient::new();
            servient.add_client_factory(FileClientFactory::new());
            Wot::with_servient(servient)
        }

        #[tokio::test]
        async fn test_consume_description_from_file() {
            let dir = tempfile::tempdir().unwrap();
            let level_path = dir.path().join("level.json");
            std::fs::write(&level_path, "3").unwrap();

            let description = json!({
                "name": "dimmer",
                "interactions": [
                    {
                        "@type": ["Property"],
                        "name": "level",
                        "links": [{ "href": file_url(&level_path) }]
                    }
                ]
            });
            let td_path = dir.path().join("dimmer.json");
            std::fs::write(&td_path, description.to_string()).unwrap();

            let wot = file_wot();
            let thing = wot
                .consume_description_uri(&file_url(&td_path))
                .await
                .unwrap();
            assert_eq!(thing.name(), "dimmer");

            let level: u32 = thing.get_property("level").await.unwrap().to_json().unwrap();
            assert_eq!(level, 3);

            thing
                .set_property("level", Content::json(&7).unwrap())
                .await
                .unwrap();
            assert_eq!(std::fs::read_to_string(&level_path).unwrap(), "7");
            assert_eq!(thing.cached_schemes(), vec!["file".to_string()]);
        }

        #[tokio::test]
        async fn test_create_from_description_uri() {
            let dir = tempfile::tempdir().unwrap();
            let td_path = dir.path().join("lamp.json");
            std::fs::write(&td_path, lamp().to_string()).unwrap();

            let wot = file_wot();
            let thing = wot
                .create_from_description_uri(&file_url(&td_path))
                .await
                .unwrap();

            assert_eq!(thing.name(), "lamp");
            assert!(wot.servient().get_thing("lamp").is_some());
        }

        #[tokio::test]
        async fn test_missing_description_file() {
            let dir = tempfile::tempdir().unwrap();
            let wot = file_wot();
            let err = wot
                .consume_description_uri(&file_url(&dir.path().join("absent.json")))
                .await
                .unwrap_err();
            assert!(matches!(err, RuntimeError::Transport(_)));
        }
    }
}
