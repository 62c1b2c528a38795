//! Request assembly
//!
//! Types for accumulating request parameters across a fluent chain and
//! snapshotting them, together with the configured defaults, into an
//! immutable descriptor at dispatch time.

mod builder;
mod params;

pub use builder::{join_url, RequestBuilder, RequestDescriptor};
pub use params::{BasicAuth, Body, MultipartPart, ParamMap, RedirectPolicy, RequestParameters};
