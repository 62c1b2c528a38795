//! Logging pipeline
//!
//! Optional middleware that formats request/response snapshots and emits
//! them to a consumer-supplied logger. Logging is opt-in per direction:
//! without a formatter for a direction, nothing is emitted for it. The
//! formatters receive read-only snapshots and never mutate the request or
//! response.

mod formatters;

pub use formatters::{RequestArrayFormatter, ResponseArrayFormatter};

use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::request::RequestDescriptor;
use crate::response::Response;

/// Level attached to emitted log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured logging backend supplied by the consumer
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: &JsonValue);
}

/// Converts a request descriptor into a structured log record
pub trait RequestFormatter: Send + Sync {
    fn format(&self, request: &RequestDescriptor, preview_length: usize) -> JsonValue;
}

/// Converts a response into a structured log record
pub trait ResponseFormatter: Send + Sync {
    fn format(&self, response: &Response) -> JsonValue;
}

/// Logger adapter that forwards records to the `tracing` ecosystem
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &JsonValue) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "apiwrap", %message),
            LogLevel::Info => tracing::info!(target: "apiwrap", %message),
            LogLevel::Warning => tracing::warn!(target: "apiwrap", %message),
            LogLevel::Error => tracing::error!(target: "apiwrap", %message),
        }
    }
}

/// Consumer-facing logging configuration, fixed at client construction
#[derive(Clone)]
pub struct LogOptions {
    pub logger: Option<Arc<dyn Logger>>,
    pub request_formatter: Option<Arc<dyn RequestFormatter>>,
    pub response_formatter: Option<Arc<dyn ResponseFormatter>>,
    pub level: LogLevel,
    /// Suppress response records for non-2xx outcomes
    pub only_success: bool,
    /// Suppress response records for 2xx outcomes
    pub only_exception: bool,
    /// Request body preview truncation, in characters
    pub preview_length: usize,
    /// When set, records are wrapped under this tag
    pub tag: Option<String>,
    /// Tagged records become `{tag: payload}` objects
    pub force_json: bool,
    /// Tagged plain records use `" | "` between tag and payload
    pub use_separator: bool,
}

impl LogOptions {
    pub const DEFAULT_PREVIEW_LENGTH: usize = 100;

    pub fn new() -> Self {
        Self {
            logger: None,
            request_formatter: None,
            response_formatter: None,
            level: LogLevel::Info,
            only_success: false,
            only_exception: false,
            preview_length: Self::DEFAULT_PREVIEW_LENGTH,
            tag: None,
            force_json: true,
            use_separator: false,
        }
    }
}

impl Default for LogOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogOptions")
            .field("logger", &self.logger.is_some())
            .field("request_formatter", &self.request_formatter.is_some())
            .field("response_formatter", &self.response_formatter.is_some())
            .field("level", &self.level)
            .field("only_success", &self.only_success)
            .field("only_exception", &self.only_exception)
            .field("preview_length", &self.preview_length)
            .field("tag", &self.tag)
            .field("force_json", &self.force_json)
            .field("use_separator", &self.use_separator)
            .finish()
    }
}

/// Emits request/response records according to the configured filters
pub struct LoggingBridge {
    options: LogOptions,
}

impl LoggingBridge {
    pub fn new(options: LogOptions) -> Self {
        Self { options }
    }

    /// One record per dispatch, emitted before the transport call
    pub fn log_request(&self, request: &RequestDescriptor) {
        let (Some(logger), Some(formatter)) =
            (&self.options.logger, &self.options.request_formatter)
        else {
            return;
        };
        let payload = formatter.format(request, self.options.preview_length);
        self.emit(logger.as_ref(), payload);
    }

    /// One record per dispatch, emitted after the transport call resolves,
    /// subject to the success/exception-only filters.
    pub fn log_response(&self, response: &Response) {
        let (Some(logger), Some(formatter)) =
            (&self.options.logger, &self.options.response_formatter)
        else {
            return;
        };
        // Conflicting filters: log nothing rather than guessing
        if self.options.only_success && self.options.only_exception {
            return;
        }
        let success = response.is_success();
        if self.options.only_success && !success {
            return;
        }
        if self.options.only_exception && success {
            return;
        }
        let payload = formatter.format(response);
        self.emit(logger.as_ref(), payload);
    }

    fn emit(&self, logger: &dyn Logger, payload: JsonValue) {
        let message = match &self.options.tag {
            Some(tag) if self.options.force_json => {
                let mut wrapped = serde_json::Map::new();
                wrapped.insert(tag.clone(), payload);
                JsonValue::Object(wrapped)
            }
            Some(tag) => {
                let separator = if self.options.use_separator { " | " } else { " " };
                JsonValue::String(format!("{tag}{separator}{payload}"))
            }
            None => payload,
        };
        logger.log(self.options.level, &message);
    }
}
