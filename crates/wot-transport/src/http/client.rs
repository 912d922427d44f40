//! HTTP protocol client implementation.
//!
//! | Operation | Method | Body |
//! |-----------|--------|------|
//! | read | `GET` | response body |
//! | write | `PUT` | content sent as request body |
//! | invoke | `POST` | parameter sent as request body, response body returned |

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use tracing::{debug, info, trace};

use wot_core::{
    BoxedProtocolClient, Content, ProtocolClient, ProtocolClientFactory, TransportError,
    TransportResult,
};

/// Media type assumed when a response carries no `Content-Type`.
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Value of the `Accept` header, if any.
    pub accept: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept: None,
        }
    }
}

impl HttpClientConfig {
    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `Accept` header.
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }
}

/// HTTP(S) protocol client.
pub struct HttpClient {
    client: Client,
    scheme: &'static str,
    accept: Option<String>,
    stopped: AtomicBool,
}

impl HttpClient {
    /// Creates a client for `scheme` (`http` or `https`).
    pub fn new(scheme: &'static str, config: &HttpClientConfig) -> TransportResult<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Io(e.to_string()))?;

        Ok(Self {
            client,
            scheme,
            accept: config.accept.clone(),
            stopped: AtomicBool::new(false),
        })
    }

    fn ensure_running(&self) -> TransportResult<()> {
        if self.stopped.load(Ordering::Acquire) {
            return Err(TransportError::Stopped {
                scheme: self.scheme,
            });
        }
        Ok(())
    }

    fn with_body(request: RequestBuilder, content: Content) -> RequestBuilder {
        request
            .header(CONTENT_TYPE, content.media_type)
            .body(content.body)
    }

    async fn send(&self, href: &str, mut request: RequestBuilder) -> TransportResult<Content> {
        self.ensure_running()?;
        if let Some(accept) = &self.accept {
            request = request.header(ACCEPT, accept);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| TransportError::ConnectionFailed {
                href: href.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                href: href.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let media_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(FALLBACK_MEDIA_TYPE)
            .to_string();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Io(e.to_string()))?;

        trace!(href = %href, status = status.as_u16(), len = body.len(), "HTTP response");
        Ok(Content::new(media_type, body.to_vec()))
    }
}

#[async_trait]
impl ProtocolClient for HttpClient {
    fn scheme(&self) -> &str {
        self.scheme
    }

    async fn read_resource(&self, href: &str) -> TransportResult<Content> {
        debug!(href = %href, "HTTP GET");
        self.send(href, self.client.get(href)).await
    }

    async fn write_resource(&self, href: &str, content: Content) -> TransportResult<()> {
        debug!(href = %href, media_type = %content.media_type, "HTTP PUT");
        let request = Self::with_body(self.client.put(href), content);
        self.send(href, request).await.map(|_| ())
    }

    async fn invoke_resource(
        &self,
        href: &str,
        parameter: Option<Content>,
    ) -> TransportResult<Content> {
        debug!(href = %href, has_parameter = parameter.is_some(), "HTTP POST");
        let request = match parameter {
            Some(content) => Self::with_body(self.client.post(href), content),
            None => self.client.post(href),
        };
        self.send(href, request).await
    }

    fn stop(&self) -> bool {
        let was_running = !self.stopped.swap(true, Ordering::AcqRel);
        if was_running {
            info!(scheme = %self.scheme, "HTTP client stopped");
        }
        was_running
    }
}

/// Creates [`HttpClient`]s for one of `http` or `https`.
pub struct HttpClientFactory {
    scheme: &'static str,
    config: HttpClientConfig,
}

impl HttpClientFactory {
    /// Factory for plain `http` clients.
    pub fn http(config: HttpClientConfig) -> Self {
        Self {
            scheme: "http",
            config,
        }
    }

    /// Factory for `https` clients.
    pub fn https(config: HttpClientConfig) -> Self {
        Self {
            scheme: "https",
            config,
        }
    }
}

impl ProtocolClientFactory for HttpClientFactory {
    fn scheme(&self) -> &str {
        self.scheme
    }

    fn create_client(&self) -> TransportResult<BoxedProtocolClient> {
        Ok(Arc::new(HttpClient::new(self.scheme, &self.config)?))
    }
}
