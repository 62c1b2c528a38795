//! HTTP protocol types
//!
//! Provides the verb set a client can dispatch and name resolution for the
//! dynamic dispatch entry point.

mod verb;

pub use verb::Verb;
