//! Test doubles for protocol clients and providers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::foundation::content::Content;
use crate::foundation::error::{TransportError, TransportResult};
use crate::integration::client::{BoxedProtocolClient, ClientProvider, ProtocolClient};

/// A call observed by [`RecordingClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Read(String),
    Write(String, Content),
    Invoke(String, Option<Content>),
}

/// Client that records every call and answers with a fixed payload.
pub struct RecordingClient {
    scheme: String,
    calls: Mutex<Vec<Call>>,
    failing: bool,
}

impl RecordingClient {
    pub fn new(scheme: &str) -> Self {
        Self {
            scheme: scheme.to_string(),
            calls: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    pub fn failing(scheme: &str) -> Self {
        Self {
            failing: true,
            ..Self::new(scheme)
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn answer(&self, href: &str, call: Call) -> TransportResult<Content> {
        self.calls.lock().push(call);
        if self.failing {
            return Err(TransportError::Status {
                href: href.to_string(),
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(Content::new("text/plain", format!("{}:{href}", self.scheme)))
    }
}

#[async_trait]
impl ProtocolClient for RecordingClient {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    async fn read_resource(&self, href: &str) -> TransportResult<Content> {
        self.answer(href, Call::Read(href.to_string()))
    }

    async fn write_resource(&self, href: &str, content: Content) -> TransportResult<()> {
        self.answer(href, Call::Write(href.to_string(), content))
            .map(|_| ())
    }

    async fn invoke_resource(
        &self,
        href: &str,
        parameter: Option<Content>,
    ) -> TransportResult<Content> {
        self.answer(href, Call::Invoke(href.to_string(), parameter))
    }
}

/// Provider that supports a fixed scheme set and counts its lookups.
pub struct CountingProvider {
    supported: Vec<String>,
    yield_none: bool,
    failing_clients: bool,
    lookups: AtomicUsize,
    requested: Mutex<Vec<String>>,
    created: Mutex<Vec<Arc<RecordingClient>>>,
}

impl CountingProvider {
    pub fn supporting(schemes: &[&str]) -> Self {
        Self {
            supported: schemes.iter().map(|s| s.to_string()).collect(),
            yield_none: false,
            failing_clients: false,
            lookups: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
        }
    }

    /// Reports support but never hands out a client.
    pub fn yielding_none(mut self) -> Self {
        self.yield_none = true;
        self
    }

    /// Hands out clients whose every call fails.
    pub fn with_failing_clients(mut self) -> Self {
        self.failing_clients = true;
        self
    }

    /// Number of `has_client_for` calls.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Schemes passed to `get_client_for`, in call order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }

    /// Schemes of the clients handed out, in creation order.
    pub fn created(&self) -> Vec<String> {
        self.created
            .lock()
            .iter()
            .map(|c| c.scheme().to_string())
            .collect()
    }

    /// The `idx`-th client handed out.
    pub fn client(&self, idx: usize) -> Arc<RecordingClient> {
        self.created.lock()[idx].clone()
    }
}

impl ClientProvider for CountingProvider {
    fn has_client_for(&self, scheme: &str) -> bool {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.supported.iter().any(|s| s == scheme)
    }

    fn get_client_for(&self, scheme: &str) -> Option<BoxedProtocolClient> {
        self.requested.lock().push(scheme.to_string());
        if self.yield_none || !self.supported.iter().any(|s| s == scheme) {
            return None;
        }
        let client = Arc::new(if self.failing_clients {
            RecordingClient::failing(scheme)
        } else {
            RecordingClient::new(scheme)
        });
        self.created.lock().push(client.clone());
        Some(client as BoxedProtocolClient)
    }
}
