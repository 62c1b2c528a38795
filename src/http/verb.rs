//! HTTP verb resolution
//!
//! Dispatch accepts an arbitrary method name, but only the fixed verb set
//! below is valid. Unknown names are rejected with a typed error at the call
//! boundary instead of falling through to the transport.

use std::fmt;
use std::str::FromStr;

use reqwest::Method;

use crate::errors::ApiwrapError;

/// The HTTP verbs a client can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
}

impl Verb {
    /// All supported verbs
    pub const ALL: [Verb; 7] = [
        Verb::Get,
        Verb::Post,
        Verb::Put,
        Verb::Delete,
        Verb::Head,
        Verb::Options,
        Verb::Patch,
    ];

    /// Canonical uppercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Head => "HEAD",
            Verb::Options => "OPTIONS",
            Verb::Patch => "PATCH",
        }
    }

    /// Resolve a caller-supplied method name, case-insensitively.
    ///
    /// Anything outside the fixed verb set fails with
    /// [`ApiwrapError::UnsupportedOperation`] naming the rejected method.
    pub fn resolve(name: &str) -> Result<Verb, ApiwrapError> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            "HEAD" => Ok(Verb::Head),
            "OPTIONS" => Ok(Verb::Options),
            "PATCH" => Ok(Verb::Patch),
            other => Err(ApiwrapError::UnsupportedOperation(other.to_string())),
        }
    }

    pub(crate) fn to_method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
            Verb::Head => Method::HEAD,
            Verb::Options => Method::OPTIONS,
            Verb::Patch => Method::PATCH,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = ApiwrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::resolve(s)
    }
}
