//! Request descriptor construction
//!
//! Combines the configured base URL, optional prefix and the accumulated
//! parameters into an immutable [`RequestDescriptor`]. The slash
//! normalization here is load-bearing for consumers using path-based
//! resource addressing; do not loosen it.

use crate::http::Verb;

use super::params::{ParamMap, RequestParameters};

/// Immutable snapshot of a request about to be dispatched.
///
/// Built once per dispatch, after the default-merge step, and carried on the
/// returned response for inspection and logging.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub verb: Verb,
    pub url: String,
    pub parameters: RequestParameters,
}

/// Builds descriptors from the configured base URL, prefix and defaults
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    prefix: Option<String>,
    default_headers: ParamMap,
    default_queries: ParamMap,
}

impl RequestBuilder {
    pub fn new(
        base_url: String,
        prefix: Option<String>,
        default_headers: ParamMap,
        default_queries: ParamMap,
    ) -> Self {
        Self {
            base_url,
            prefix,
            default_headers,
            default_queries,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Merge defaults into the accumulated parameters and snapshot them into
    /// an immutable descriptor. Consumes the one-shot skip flags.
    pub fn build(&self, verb: Verb, path: &str, mut parameters: RequestParameters) -> RequestDescriptor {
        self.merge_default_headers(&mut parameters);
        self.merge_default_queries(&mut parameters);
        parameters.skip_default_headers = false;
        parameters.skip_default_queries = false;

        RequestDescriptor {
            verb,
            url: join_url(&self.base_url, self.prefix.as_deref(), path),
            parameters,
        }
    }

    /// Defaults form the base; request-specific entries win on key collision.
    /// An empty merged map stays empty, which downstream treats as "no
    /// headers parameter" rather than an empty mapping.
    fn merge_default_headers(&self, parameters: &mut RequestParameters) {
        if parameters.skip_default_headers || self.default_headers.is_empty() {
            return;
        }
        let own = std::mem::take(&mut parameters.headers);
        let mut merged = self.default_headers.clone();
        merged.extend(own);
        parameters.headers = merged;
    }

    fn merge_default_queries(&self, parameters: &mut RequestParameters) {
        if parameters.skip_default_queries || self.default_queries.is_empty() {
            return;
        }
        let own = std::mem::take(&mut parameters.query);
        let mut merged = self.default_queries.clone();
        merged.extend(own);
        parameters.query = merged;
    }
}

/// Join base URL, prefix and path with exact slash normalization.
///
/// The prefix is trimmed of surrounding slashes and given a single trailing
/// slash; the final URL is `trim(base, '/') + '/' + prefix + trim(path, '/')`.
pub fn join_url(base: &str, prefix: Option<&str>, path: &str) -> String {
    let mut uri = String::new();
    if let Some(prefix) = prefix {
        let trimmed = prefix.trim_matches('/');
        if !trimmed.is_empty() {
            uri.push_str(trimmed);
            uri.push('/');
        }
    }
    uri.push_str(path.trim_matches('/'));

    format!("{}/{}", base.trim_matches('/'), uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_basic() {
        assert_eq!(
            join_url("https://api.test", Some("v1"), "users/5"),
            "https://api.test/v1/users/5"
        );
    }

    #[test]
    fn test_join_url_strips_duplicate_slashes() {
        // Idempotent under re-normalization regardless of slash placement
        assert_eq!(
            join_url("https://api.test/", Some("/v1/"), "/users/5/"),
            "https://api.test/v1/users/5"
        );
        assert_eq!(
            join_url("https://api.test", None, "users"),
            "https://api.test/users"
        );
        assert_eq!(
            join_url("https://api.test", Some(""), "users"),
            "https://api.test/users"
        );
    }

    #[test]
    fn test_join_url_empty_path() {
        assert_eq!(join_url("https://api.test", None, ""), "https://api.test/");
        assert_eq!(join_url("https://api.test", Some("v1"), ""), "https://api.test/v1/");
    }

    fn map(pairs: &[(&str, &str)]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_request_headers_win_over_defaults() {
        let builder = RequestBuilder::new(
            "https://api.test".to_string(),
            None,
            map(&[("X-Origin", "default"), ("X-Keep", "yes")]),
            ParamMap::new(),
        );
        let mut parameters = RequestParameters::new();
        parameters.headers = map(&[("X-Origin", "request")]);

        let descriptor = builder.build(Verb::Get, "users", parameters);
        assert_eq!(
            descriptor.parameters.headers.get("X-Origin").map(String::as_str),
            Some("request")
        );
        assert_eq!(
            descriptor.parameters.headers.get("X-Keep").map(String::as_str),
            Some("yes")
        );
    }

    #[test]
    fn test_skip_flag_suppresses_defaults_and_is_consumed() {
        let builder = RequestBuilder::new(
            "https://api.test".to_string(),
            None,
            map(&[("X-Origin", "default")]),
            map(&[("page", "1")]),
        );
        let mut parameters = RequestParameters::new();
        parameters.skip_default_headers = true;
        parameters.skip_default_queries = true;

        let descriptor = builder.build(Verb::Get, "users", parameters);
        assert!(descriptor.parameters.headers.is_empty());
        assert!(descriptor.parameters.query.is_empty());
        assert!(!descriptor.parameters.skip_default_headers);
        assert!(!descriptor.parameters.skip_default_queries);
    }

    #[test]
    fn test_empty_merge_yields_no_headers() {
        let builder = RequestBuilder::new(
            "https://api.test".to_string(),
            None,
            ParamMap::new(),
            ParamMap::new(),
        );
        let descriptor = builder.build(Verb::Get, "users", RequestParameters::new());
        assert!(descriptor.parameters.headers.is_empty());
        assert!(descriptor.parameters.query.is_empty());
    }

    #[test]
    fn test_default_queries_merge() {
        let builder = RequestBuilder::new(
            "https://api.test".to_string(),
            None,
            ParamMap::new(),
            map(&[("token", "t"), ("page", "1")]),
        );
        let mut parameters = RequestParameters::new();
        parameters.query = map(&[("page", "2")]);

        let descriptor = builder.build(Verb::Get, "users", parameters);
        assert_eq!(descriptor.parameters.query.get("token").map(String::as_str), Some("t"));
        assert_eq!(descriptor.parameters.query.get("page").map(String::as_str), Some("2"));
    }
}
