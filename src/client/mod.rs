//! API client core
//!
//! Orchestrates one dispatch: resolve the verb, build an immutable
//! descriptor from the accumulated parameters, hand it to the transport,
//! classify the outcome, route snapshots through the logging pipeline and
//! reset the accumulated state. The reset is unconditional; an error never
//! leaves the client polluted for the next call.
//!
//! A consumer wraps [`ApiClient`] in its own service type and exposes typed
//! endpoint methods built from the fluent parameter setters:
//!
//! ```no_run
//! use apiwrap::{ApiClient, ApiConfig, ParamMap, Response, Result};
//!
//! struct UserService {
//!     client: ApiClient,
//! }
//!
//! impl UserService {
//!     fn new() -> Result<Self> {
//!         let config = ApiConfig::new("https://api.example.com").prefix("v2");
//!         Ok(Self { client: ApiClient::new(config)? })
//!     }
//!
//!     async fn user(&mut self, id: u64) -> Result<Response> {
//!         let mut query = ParamMap::new();
//!         query.insert("expand".to_string(), "profile".to_string());
//!         self.client.query(query).get(&format!("users/{id}")).await
//!     }
//! }
//! ```
//!
//! One fluent chain must fully resolve before another begins; `&mut self`
//! on every setter and verb method enforces that statically. Concurrent
//! logical requests need separate client instances.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::classify::{classify, ExceptionTable, TableOverrides};
use crate::config::ApiConfig;
use crate::errors::{ApiwrapError, Result};
use crate::http::Verb;
use crate::logging::LoggingBridge;
use crate::request::{
    BasicAuth, Body, MultipartPart, ParamMap, RedirectPolicy, RequestBuilder, RequestParameters,
};
use crate::response::Response;
use crate::transport::{HttpTransport, Transport};

/// Raw body input accepted by [`ApiClient::body`]
pub enum BodySource {
    /// Passed through untouched
    Bytes(Vec<u8>),
    /// Serialized to JSON; sets the `Content-Type: application/json` header
    Structured(JsonValue),
}

impl From<&str> for BodySource {
    fn from(value: &str) -> Self {
        BodySource::Bytes(value.as_bytes().to_vec())
    }
}

impl From<String> for BodySource {
    fn from(value: String) -> Self {
        BodySource::Bytes(value.into_bytes())
    }
}

impl From<Vec<u8>> for BodySource {
    fn from(value: Vec<u8>) -> Self {
        BodySource::Bytes(value)
    }
}

impl From<&[u8]> for BodySource {
    fn from(value: &[u8]) -> Self {
        BodySource::Bytes(value.to_vec())
    }
}

impl From<JsonValue> for BodySource {
    fn from(value: JsonValue) -> Self {
        BodySource::Structured(value)
    }
}

/// The dispatch orchestrator behind every API wrapper
pub struct ApiClient {
    builder: RequestBuilder,
    parameters: RequestParameters,
    http_exceptions: ExceptionTable,
    overrides: TableOverrides,
    logging: LoggingBridge,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client with the default reqwest-backed transport
    pub fn new(config: ApiConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config.timeout)?);
        Self::with_transport(config, transport)
    }

    /// Build a client around a custom transport. This is the injection point
    /// for middleware stacks, recorders and test doubles.
    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ApiwrapError::Config("base URL must not be empty".to_string()));
        }
        url::Url::parse(&config.base_url)?;

        Ok(Self {
            builder: RequestBuilder::new(
                config.base_url,
                config.prefix,
                config.default_headers,
                config.default_queries,
            ),
            parameters: RequestParameters::new(),
            http_exceptions: config.http_exceptions,
            overrides: TableOverrides::default(),
            logging: LoggingBridge::new(config.logging),
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        self.builder.base_url()
    }

    /// Underlying transport collaborator
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Parameters accumulated so far for the next dispatch
    pub fn parameters(&self) -> &RequestParameters {
        &self.parameters
    }

    // --- fluent parameter setters ---------------------------------------

    /// Replace the request headers for the next dispatch
    pub fn headers(&mut self, headers: ParamMap) -> &mut Self {
        self.parameters.headers = headers;
        self
    }

    /// Replace the query parameters for the next dispatch
    pub fn query(&mut self, query: ParamMap) -> &mut Self {
        self.parameters.query = query;
        self
    }

    /// Form fields for POST, PUT and PATCH bodies
    pub fn form_params(&mut self, fields: ParamMap) -> &mut Self {
        self.parameters.body = Some(Body::Form(fields));
        self
    }

    /// Raw or structured request body. Structured input is serialized to
    /// JSON and the `Content-Type: application/json` header is set; raw
    /// input is passed through untouched.
    pub fn body(&mut self, contents: impl Into<BodySource>) -> &mut Self {
        match contents.into() {
            BodySource::Structured(value) => {
                self.parameters
                    .headers
                    .insert("Content-Type".to_string(), "application/json".to_string());
                self.parameters.body =
                    Some(Body::Raw(serde_json::to_vec(&value).unwrap_or_default()));
            }
            BodySource::Bytes(bytes) => {
                self.parameters.body = Some(Body::Raw(bytes));
            }
        }
        self
    }

    /// JSON request body; the value must be an object or array
    pub fn json(&mut self, value: JsonValue) -> Result<&mut Self> {
        if !(value.is_object() || value.is_array()) {
            return Err(ApiwrapError::InvalidParameter(
                "json() expects a JSON object or array".to_string(),
            ));
        }
        self.parameters.body = Some(Body::Json(value));
        Ok(self)
    }

    /// Basic auth for the next dispatch
    pub fn auth(&mut self, username: impl Into<String>, password: impl Into<String>) -> &mut Self {
        self.parameters.auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Redirect handling override for the next dispatch
    pub fn allow_redirects(&mut self, policy: RedirectPolicy) -> &mut Self {
        self.parameters.allow_redirects = Some(policy);
        self
    }

    /// Append a multipart part read from a file on disk.
    ///
    /// A missing or unreadable path appends an empty placeholder part
    /// instead of failing, mirroring the long-standing behavior consumers
    /// depend on.
    pub fn file(&mut self, name: &str, path: impl AsRef<Path>, filename: &str) -> &mut Self {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(contents) => {
                self.parameters
                    .multipart
                    .push(MultipartPart::file(name, contents, filename));
            }
            Err(err) => {
                tracing::warn!(
                    target: "apiwrap",
                    path = %path.display(),
                    %err,
                    "multipart file unreadable, appending empty part"
                );
                self.parameters.multipart.push(MultipartPart::default());
            }
        }
        self
    }

    /// Append a multipart part from in-memory contents
    pub fn attach(&mut self, name: &str, contents: impl Into<Vec<u8>>, filename: &str) -> &mut Self {
        self.parameters
            .multipart
            .push(MultipartPart::file(name, contents, filename));
        self
    }

    /// Append each entry as a plain multipart form field
    pub fn form_data(&mut self, data: ParamMap) -> &mut Self {
        for (name, value) in data {
            self.parameters
                .multipart
                .push(MultipartPart::field(name, value.into_bytes()));
        }
        self
    }

    /// Append a fully-specified multipart part (custom part headers etc.)
    pub fn part(&mut self, part: MultipartPart) -> &mut Self {
        self.parameters.multipart.push(part);
        self
    }

    /// Overwrite every accumulated parameter at once; escape hatch for full
    /// manual control
    pub fn params(&mut self, parameters: RequestParameters) -> &mut Self {
        self.parameters = parameters;
        self
    }

    /// Suppress default-header merging for the next dispatch only
    pub fn skip_default_headers(&mut self) -> &mut Self {
        self.parameters.skip_default_headers = true;
        self
    }

    /// Suppress default-query merging for the next dispatch only
    pub fn skip_default_queries(&mut self) -> &mut Self {
        self.parameters.skip_default_queries = true;
        self
    }

    /// Disable classification for the next dispatch (empty slice), or remove
    /// the listed status codes from its working table
    pub fn skip_http_exceptions(&mut self, codes: &[u16]) -> &mut Self {
        if codes.is_empty() {
            self.overrides.skip_all();
        } else {
            self.overrides.skip_codes(codes);
        }
        self
    }

    /// Add status-to-kind entries for the next dispatch only
    pub fn push_http_exceptions<I, K>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (u16, K)>,
        K: Into<String>,
    {
        for (status, kind) in entries {
            self.overrides.push(status, kind);
        }
        self
    }

    // --- dispatch --------------------------------------------------------

    /// Dispatch by method name; valid names are the seven HTTP verbs,
    /// case-insensitively. Anything else fails with
    /// [`ApiwrapError::UnsupportedOperation`].
    pub async fn request(&mut self, method: &str, path: &str) -> Result<Response> {
        let verb = Verb::resolve(method)?;
        self.dispatch(verb, path).await
    }

    pub async fn get(&mut self, path: &str) -> Result<Response> {
        self.dispatch(Verb::Get, path).await
    }

    pub async fn post(&mut self, path: &str) -> Result<Response> {
        self.dispatch(Verb::Post, path).await
    }

    pub async fn put(&mut self, path: &str) -> Result<Response> {
        self.dispatch(Verb::Put, path).await
    }

    pub async fn delete(&mut self, path: &str) -> Result<Response> {
        self.dispatch(Verb::Delete, path).await
    }

    pub async fn head(&mut self, path: &str) -> Result<Response> {
        self.dispatch(Verb::Head, path).await
    }

    pub async fn options(&mut self, path: &str) -> Result<Response> {
        self.dispatch(Verb::Options, path).await
    }

    pub async fn patch(&mut self, path: &str) -> Result<Response> {
        self.dispatch(Verb::Patch, path).await
    }

    /// One pass of the dispatch pipeline: build, send, classify, log, reset
    pub async fn dispatch(&mut self, verb: Verb, path: &str) -> Result<Response> {
        // Taking the per-call state up front guarantees the reset happens on
        // every exit path, including failures.
        let parameters = std::mem::take(&mut self.parameters);
        let overrides = std::mem::take(&mut self.overrides);

        let descriptor = self.builder.build(verb, path, parameters);
        tracing::debug!(
            target: "apiwrap",
            verb = %descriptor.verb,
            url = %descriptor.url,
            "dispatching request"
        );
        self.logging.log_request(&descriptor);

        match self.transport.send(&descriptor).await {
            Ok(raw) => {
                let response = Response::new(Some(raw), descriptor);
                self.logging.log_response(&response);
                self.classified(response, &overrides)
            }
            Err(failure) => {
                // Transport errors bypass classification, but logging still
                // sees the best-available response object.
                let response = Response::new(failure.response, descriptor);
                self.logging.log_response(&response);
                Err(ApiwrapError::Transport {
                    message: failure.message,
                    response: Box::new(response),
                })
            }
        }
    }

    fn classified(&self, response: Response, overrides: &TableOverrides) -> Result<Response> {
        let Some(table) = overrides.apply(&self.http_exceptions) else {
            return Ok(response);
        };
        let Some(status) = response.status() else {
            return Ok(response);
        };
        match classify(status, &table) {
            Some(kind) => {
                let kind = kind.to_string();
                Err(ApiwrapError::HttpException {
                    status,
                    kind,
                    response: Box::new(response),
                })
            }
            None => Ok(response),
        }
    }
}
