//! Client configuration
//!
//! Everything a client needs is declared here once, at construction, and is
//! immutable for the client's lifetime. An explicit configuration struct
//! replaces subclass-hook and static-state configuration styles; the setters
//! mirror the hooks a wrapper would otherwise override.

use std::sync::Arc;
use std::time::Duration;

use crate::classify::ExceptionTable;
use crate::logging::{LogLevel, LogOptions, Logger, RequestFormatter, ResponseFormatter};
use crate::request::ParamMap;
use crate::transport::DEFAULT_TIMEOUT;

/// Construction-time configuration for an [`ApiClient`](crate::ApiClient)
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// URL prefix inserted between base URL and every request path
    pub prefix: Option<String>,
    /// Headers merged into every request unless skipped per call
    pub default_headers: ParamMap,
    /// Query parameters merged into every request unless skipped per call
    pub default_queries: ParamMap,
    pub timeout: Duration,
    /// Base status-to-error-kind table
    pub http_exceptions: ExceptionTable,
    pub logging: LogOptions,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            prefix: None,
            default_headers: ParamMap::new(),
            default_queries: ParamMap::new(),
            timeout: DEFAULT_TIMEOUT,
            http_exceptions: ExceptionTable::new(),
            logging: LogOptions::new(),
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn default_headers(mut self, headers: ParamMap) -> Self {
        self.default_headers = headers;
        self
    }

    pub fn default_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_queries.insert(name.into(), value.into());
        self
    }

    pub fn default_queries(mut self, queries: ParamMap) -> Self {
        self.default_queries = queries;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Register a status code in the base exception table
    pub fn http_exception(mut self, status: u16, kind: impl Into<String>) -> Self {
        self.http_exceptions.insert(status, kind);
        self
    }

    pub fn http_exceptions(mut self, table: ExceptionTable) -> Self {
        self.http_exceptions = table;
        self
    }

    /// Supply a logger; without one the logging pipeline stays inert
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logging.logger = Some(logger);
        self
    }

    /// Enable request-side logging
    pub fn request_formatter(mut self, formatter: Arc<dyn RequestFormatter>) -> Self {
        self.logging.request_formatter = Some(formatter);
        self
    }

    /// Enable response-side logging
    pub fn response_formatter(mut self, formatter: Arc<dyn ResponseFormatter>) -> Self {
        self.logging.response_formatter = Some(formatter);
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.logging.level = level;
        self
    }

    pub fn log_only_success_response(mut self, only: bool) -> Self {
        self.logging.only_success = only;
        self
    }

    pub fn log_only_exception_response(mut self, only: bool) -> Self {
        self.logging.only_exception = only;
        self
    }

    /// Request body preview truncation for log records
    pub fn log_request_length(mut self, length: usize) -> Self {
        self.logging.preview_length = length;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.logging.tag = Some(tag.into());
        self
    }

    pub fn force_json(mut self, force: bool) -> Self {
        self.logging.force_json = force;
        self
    }

    pub fn use_separator(mut self, separate: bool) -> Self {
        self.logging.use_separator = separate;
        self
    }
}
