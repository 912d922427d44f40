//! Payloads exchanged with protocol clients.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Media type used when none is declared.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// A payload together with its media type.
///
/// Protocol clients move opaque bytes; the JSON helpers cover the common case
/// where both ends speak `application/json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    /// Media type of `body`.
    pub media_type: String,
    /// Raw payload.
    pub body: Vec<u8>,
}

impl Content {
    /// Creates content from raw bytes.
    pub fn new(media_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            media_type: media_type.into(),
            body: body.into(),
        }
    }

    /// Serializes `value` as `application/json`.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        Ok(Self::new(DEFAULT_MEDIA_TYPE, serde_json::to_vec(value)?))
    }

    /// Empty `application/json` content.
    pub fn empty() -> Self {
        Self::new(DEFAULT_MEDIA_TYPE, Vec::new())
    }

    /// Returns true if the media type is JSON (parameters ignored).
    pub fn is_json(&self) -> bool {
        self.media_type
            .split(';')
            .next()
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(DEFAULT_MEDIA_TYPE))
    }

    /// Decodes the body as JSON.
    pub fn to_json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl From<serde_json::Value> for Content {
    fn from(value: serde_json::Value) -> Self {
        // Serializing a Value cannot fail.
        Self::new(DEFAULT_MEDIA_TYPE, value.to_string().into_bytes())
    }
}
