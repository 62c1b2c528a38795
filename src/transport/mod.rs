//! Transport collaborator
//!
//! The only layer that performs network I/O. The default implementation
//! sits on `reqwest`; anything else (middleware stacks, recorders, fakes)
//! plugs in through the [`Transport`] trait at client construction.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::errors::Result;
use crate::request::{Body, MultipartPart, RedirectPolicy, RequestDescriptor};
use crate::response::RawResponse;

/// Default transport timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure raised by a transport, carrying the best-available partial
/// response when the transport could recover one.
#[derive(Debug)]
pub struct TransportFailure {
    pub message: String,
    pub response: Option<RawResponse>,
}

/// Outcome of a single transport attempt
pub type TransportOutcome = std::result::Result<RawResponse, TransportFailure>;

/// External HTTP execution engine. Exactly one attempt per dispatch; retry
/// and backoff, if desired, are layered outside this crate.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> TransportOutcome;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    /// Wrap an already-configured reqwest client
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Underlying reqwest client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// reqwest fixes the redirect policy at client construction, so a
    /// per-request override needs a dedicated client.
    fn client_for(&self, request: &RequestDescriptor) -> Result<Client> {
        match request.parameters.allow_redirects {
            None => Ok(self.client.clone()),
            Some(policy) => {
                let redirect = match policy {
                    RedirectPolicy::Disabled => reqwest::redirect::Policy::none(),
                    RedirectPolicy::Limited(max) => reqwest::redirect::Policy::limited(max),
                };
                Ok(Client::builder()
                    .timeout(self.timeout)
                    .redirect(redirect)
                    .build()?)
            }
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> TransportOutcome {
        let client = match self.client_for(request) {
            Ok(client) => client,
            Err(err) => {
                return Err(TransportFailure {
                    message: err.to_string(),
                    response: None,
                })
            }
        };

        let parameters = &request.parameters;
        let mut builder = client.request(request.verb.to_method(), &request.url);

        for (name, value) in &parameters.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !parameters.query.is_empty() {
            let pairs: Vec<(&str, &str)> = parameters
                .query
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();
            builder = builder.query(&pairs);
        }
        if let Some(auth) = &parameters.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        if !parameters.multipart.is_empty() {
            builder = builder.multipart(build_form(&parameters.multipart));
        } else if let Some(body) = &parameters.body {
            builder = match body {
                Body::Raw(bytes) => builder.body(bytes.clone()),
                Body::Json(value) => builder.json(value),
                Body::Form(fields) => builder.form(fields),
            };
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                // Some reqwest errors know the status they died on; surface
                // it as a partial response so logging still sees something.
                let partial = err.status().map(|status| RawResponse {
                    status: status.as_u16(),
                    headers: IndexMap::new(),
                    body: Bytes::new(),
                });
                return Err(TransportFailure {
                    message: err.to_string(),
                    response: partial,
                });
            }
        };

        let status = response.status().as_u16();
        let mut headers: IndexMap<String, String> = IndexMap::new();
        for (name, value) in response.headers() {
            let value = value.to_str().unwrap_or_default().to_string();
            match headers.entry(name.as_str().to_string()) {
                indexmap::map::Entry::Occupied(mut entry) => {
                    let joined = entry.get_mut();
                    joined.push_str(", ");
                    joined.push_str(&value);
                }
                indexmap::map::Entry::Vacant(entry) => {
                    entry.insert(value);
                }
            }
        }

        // Bodies are single-read streams; drain exactly once here so every
        // downstream consumer is served from the cache.
        match response.bytes().await {
            Ok(body) => Ok(RawResponse {
                status,
                headers,
                body,
            }),
            Err(err) => Err(TransportFailure {
                message: err.to_string(),
                response: Some(RawResponse {
                    status,
                    headers,
                    body: Bytes::new(),
                }),
            }),
        }
    }
}

fn build_form(parts: &[MultipartPart]) -> Form {
    let mut form = Form::new();
    for part in parts {
        form = form.part(part.name.clone(), build_part(part));
    }
    form
}

fn build_part(part: &MultipartPart) -> Part {
    let mut item = Part::bytes(part.contents.clone());

    let content_type = part
        .headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.clone())
        .or_else(|| {
            part.filename.as_deref().map(|filename| {
                mime_guess::from_path(filename)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            })
        });
    if let Some(content_type) = content_type {
        item = match item.mime_str(&content_type) {
            Ok(tagged) => tagged,
            Err(_) => Part::bytes(part.contents.clone()),
        };
    }

    if let Some(filename) = &part.filename {
        item = item.file_name(filename.clone());
    }

    let mut extra = HeaderMap::new();
    for (name, value) in &part.headers {
        if name.eq_ignore_ascii_case("content-type") {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            extra.insert(name, value);
        }
    }
    if !extra.is_empty() {
        item = item.headers(extra);
    }

    item
}
