//! Response wrapper
//!
//! Transport bodies are single-read streams. The transport drains them
//! exactly once into a [`RawResponse`]; every later consumer (classifier,
//! formatter, public accessors) is served from that cache and never touches
//! the wire again.

use bytes::Bytes;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::errors::{ApiwrapError, Result};
use crate::request::RequestDescriptor;

/// Fully-drained response as handed back by a transport
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    /// Header names to values; duplicate names are joined with `", "`
    pub headers: IndexMap<String, String>,
    pub body: Bytes,
}

/// Normalized response returned from every dispatch.
///
/// Wraps the raw transport response when one exists, or records its absence
/// after a transport-level failure; accessors report the missing-response
/// state instead of panicking.
#[derive(Debug, Clone)]
pub struct Response {
    raw: Option<RawResponse>,
    request: RequestDescriptor,
}

impl Response {
    pub fn new(raw: Option<RawResponse>, request: RequestDescriptor) -> Self {
        Self { raw, request }
    }

    /// Whether the transport produced any response at all
    pub fn has_response(&self) -> bool {
        self.raw.is_some()
    }

    pub fn status(&self) -> Option<u16> {
        self.raw.as_ref().map(|raw| raw.status)
    }

    /// 2xx outcome
    pub fn is_success(&self) -> bool {
        matches!(self.status(), Some(status) if (200..300).contains(&status))
    }

    pub fn headers(&self) -> Option<&IndexMap<String, String>> {
        self.raw.as_ref().map(|raw| &raw.headers)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers()?
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Cached body bytes; `None` when the transport produced no response
    pub fn contents(&self) -> Option<&[u8]> {
        self.raw.as_ref().map(|raw| raw.body.as_ref())
    }

    /// Body decoded as UTF-8, lossily
    pub fn text(&self) -> Option<String> {
        self.contents()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Parse the cached body as JSON
    pub fn json(&self) -> Result<JsonValue> {
        match self.contents() {
            Some(bytes) => Ok(serde_json::from_slice(bytes)?),
            None => Err(ApiwrapError::Transport {
                message: "no response body available".to_string(),
                response: Box::new(self.clone()),
            }),
        }
    }

    /// The immutable descriptor this response answers
    pub fn request(&self) -> &RequestDescriptor {
        &self.request
    }
}
