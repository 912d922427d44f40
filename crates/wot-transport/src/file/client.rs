//! `file://` protocol client implementation.
//!
//! Reads and writes local files; useful for loading Thing Descriptions from
//! disk and for simulated devices. Invoking a file is not supported.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use wot_core::{
    BoxedProtocolClient, Content, DEFAULT_MEDIA_TYPE, ProtocolClient, ProtocolClientFactory,
    TransportError, TransportResult,
};

const SCHEME: &str = "file";

/// Guesses a media type from the file extension.
fn media_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json" | "jsonld") => DEFAULT_MEDIA_TYPE,
        Some("txt") => "text/plain",
        Some("xml") => "application/xml",
        _ => "application/octet-stream",
    }
}

/// Protocol client for `file://` hrefs.
#[derive(Debug, Default)]
pub struct FileClient;

impl FileClient {
    /// Creates a new file client.
    pub fn new() -> Self {
        Self
    }

    fn to_path(href: &str) -> TransportResult<PathBuf> {
        let invalid = |reason: &str| TransportError::InvalidHref {
            href: href.to_string(),
            reason: reason.to_string(),
        };
        let url = Url::parse(href).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != SCHEME {
            return Err(invalid("not a file URL"));
        }
        url.to_file_path()
            .map_err(|()| invalid("not a local file path"))
    }
}

#[async_trait]
impl ProtocolClient for FileClient {
    fn scheme(&self) -> &str {
        SCHEME
    }

    async fn read_resource(&self, href: &str) -> TransportResult<Content> {
        let path = Self::to_path(href)?;
        debug!(path = %path.display(), "Reading file");
        let body = tokio::fs::read(&path).await?;
        Ok(Content::new(media_type_for(&path), body))
    }

    async fn write_resource(&self, href: &str, content: Content) -> TransportResult<()> {
        let path = Self::to_path(href)?;
        debug!(path = %path.display(), len = content.body.len(), "Writing file");
        tokio::fs::write(&path, content.body).await?;
        Ok(())
    }

    async fn invoke_resource(
        &self,
        _href: &str,
        _parameter: Option<Content>,
    ) -> TransportResult<Content> {
        Err(TransportError::Unsupported {
            scheme: SCHEME,
            operation: "invoke",
        })
    }
}

/// Creates [`FileClient`]s.
#[derive(Debug, Default)]
pub struct FileClientFactory;

impl FileClientFactory {
    /// Creates a new factory.
    pub fn new() -> Self {
        Self
    }
}

impl ProtocolClientFactory for FileClientFactory {
    fn scheme(&self) -> &str {
        SCHEME
    }

    fn create_client(&self) -> TransportResult<BoxedProtocolClient> {
        Ok(Arc::new(FileClient::new()))
    }
}
