//! apiwrap: building blocks for typed REST API client wrappers
//!
//! A consumer wraps [`ApiClient`] in a service type, declares a base URL and
//! defaults through [`ApiConfig`], and assembles each outgoing request from
//! a chain of fluent parameter setters ending in a verb call. The dispatch
//! pipeline builds an immutable request descriptor, hands it to the
//! transport, classifies the response status against a per-call exception
//! table and routes request/response snapshots through an optional logging
//! pipeline.
//!
//! # Module Organization
//!
//! - [`errors`] - Error types (ApiwrapError, Result)
//! - [`http`] - HTTP verb set and name resolution
//! - [`request`] - Parameter accumulator and request descriptor construction
//! - [`response`] - Normalized response wrapper with cached body
//! - [`classify`] - Status-to-error-kind classification tables
//! - [`logging`] - Pluggable logger/formatter pipeline
//! - [`transport`] - Transport trait and the reqwest-backed default
//! - [`config`] - Construction-time client configuration
//! - [`client`] - The dispatch orchestrator

pub mod classify;
pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod logging;
pub mod request;
pub mod response;
pub mod transport;

pub use classify::{classify, ExceptionTable};
pub use client::{ApiClient, BodySource};
pub use config::ApiConfig;
pub use errors::{ApiwrapError, Result};
pub use http::Verb;
pub use logging::{
    LogLevel, LogOptions, Logger, RequestArrayFormatter, RequestFormatter,
    ResponseArrayFormatter, ResponseFormatter, TracingLogger,
};
pub use request::{
    join_url, BasicAuth, Body, MultipartPart, ParamMap, RedirectPolicy, RequestDescriptor,
    RequestParameters,
};
pub use response::{RawResponse, Response};
pub use transport::{HttpTransport, Transport, TransportFailure, TransportOutcome};
