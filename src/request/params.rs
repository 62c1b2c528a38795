//! In-flight request parameter accumulator
//!
//! Holds everything a fluent chain has set for the next dispatch: headers,
//! query, body, multipart parts, auth and redirect overrides, plus the
//! one-shot skip flags consumed by the default-merge step. A fresh
//! accumulator is installed after every dispatch so state never leaks
//! between logically independent calls on the same client.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Ordered string map used for headers, queries and form fields.
///
/// IndexMap preserves the order the consumer set things in, which keeps
/// request output and log records predictable.
pub type ParamMap = IndexMap<String, String>;

/// Request body variants. The last body-setting call wins; only one of these
/// is authoritative per request.
#[derive(Debug, Clone)]
pub enum Body {
    /// Raw bytes, passed through untouched
    Raw(Vec<u8>),
    /// JSON payload serialized by the transport
    Json(JsonValue),
    /// application/x-www-form-urlencoded fields
    Form(ParamMap),
}

/// One entry of a multipart/form-data body
#[derive(Debug, Clone, Default)]
pub struct MultipartPart {
    /// Form field name
    pub name: String,
    /// Part contents
    pub contents: Vec<u8>,
    /// Filename-less parts are plain form fields
    pub filename: Option<String>,
    /// Extra part headers; a `Content-Type` entry overrides MIME guessing
    pub headers: ParamMap,
}

impl MultipartPart {
    /// Plain form field part
    pub fn field(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
            filename: None,
            headers: ParamMap::new(),
        }
    }

    /// File-style part with a filename
    pub fn file(
        name: impl Into<String>,
        contents: impl Into<Vec<u8>>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
            filename: Some(filename.into()),
            headers: ParamMap::new(),
        }
    }

    /// Attach extra part headers
    pub fn with_headers(mut self, headers: ParamMap) -> Self {
        self.headers = headers;
        self
    }
}

/// Basic auth credentials for the next dispatch
#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Per-request redirect handling override. When unset, the transport's own
/// policy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectPolicy {
    /// Never follow redirects
    Disabled,
    /// Follow up to this many redirects
    Limited(usize),
}

/// Accumulated parameters for the next dispatch
#[derive(Debug, Clone, Default)]
pub struct RequestParameters {
    pub headers: ParamMap,
    pub query: ParamMap,
    /// Authoritative non-multipart body, if any
    pub body: Option<Body>,
    /// Multipart parts; ordered and append-only within a single request.
    /// A non-empty list takes precedence over `body` at the transport.
    pub multipart: Vec<MultipartPart>,
    pub auth: Option<BasicAuth>,
    pub allow_redirects: Option<RedirectPolicy>,
    /// One-shot flags consumed by the default-merge step at dispatch
    pub skip_default_headers: bool,
    pub skip_default_queries: bool,
}

impl RequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been accumulated
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
            && self.query.is_empty()
            && self.body.is_none()
            && self.multipart.is_empty()
            && self.auth.is_none()
            && self.allow_redirects.is_none()
            && !self.skip_default_headers
            && !self.skip_default_queries
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some() || !self.multipart.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_parameters_are_empty() {
        let params = RequestParameters::new();
        assert!(params.is_empty());
        assert!(!params.has_body());
    }

    #[test]
    fn test_part_constructors() {
        let field = MultipartPart::field("token", "abc");
        assert_eq!(field.name, "token");
        assert_eq!(field.contents, b"abc");
        assert!(field.filename.is_none());

        let file = MultipartPart::file("avatar", vec![1, 2, 3], "a.png");
        assert_eq!(file.filename.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_part_headers() {
        let mut headers = ParamMap::new();
        headers.insert("Content-Type".to_string(), "text/csv".to_string());
        let part = MultipartPart::file("report", b"a,b".to_vec(), "r.csv").with_headers(headers);
        assert_eq!(part.headers.get("Content-Type").map(String::as_str), Some("text/csv"));
    }
}
