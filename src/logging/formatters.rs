//! Default record formatters
//!
//! Structured equivalents of what a consumer would typically plug in: the
//! request side captures verb, URL, headers, query and a truncated body
//! preview; the response side captures status, content type and body. A
//! transport failure with no recoverable response produces an error-marker
//! record instead of status/content fields.

use serde_json::{json, Value as JsonValue};

use crate::request::{Body, RequestDescriptor};
use crate::response::Response;

use super::{RequestFormatter, ResponseFormatter};

/// Structured request record formatter
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestArrayFormatter;

impl RequestFormatter for RequestArrayFormatter {
    fn format(&self, request: &RequestDescriptor, preview_length: usize) -> JsonValue {
        json!({
            "verb": request.verb.as_str(),
            "url": request.url,
            "headers": request.parameters.headers,
            "query": request.parameters.query,
            "body": body_preview(request, preview_length),
        })
    }
}

/// Structured response record formatter
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseArrayFormatter;

impl ResponseFormatter for ResponseArrayFormatter {
    fn format(&self, response: &Response) -> JsonValue {
        match response.status() {
            Some(status) => json!({
                "status": status,
                "content_type": response.content_type().unwrap_or(""),
                "body": response.text().unwrap_or_default(),
            }),
            None => json!({ "error": "no response" }),
        }
    }
}

fn body_preview(request: &RequestDescriptor, preview_length: usize) -> String {
    let parameters = &request.parameters;
    let rendered = if !parameters.multipart.is_empty() {
        format!("<multipart: {} parts>", parameters.multipart.len())
    } else {
        match &parameters.body {
            Some(Body::Raw(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
            Some(Body::Json(value)) => value.to_string(),
            Some(Body::Form(fields)) => serde_urlencoded::to_string(fields).unwrap_or_default(),
            None => String::new(),
        }
    };
    truncate_preview(&rendered, preview_length)
}

fn truncate_preview(preview: &str, max_chars: usize) -> String {
    if preview.chars().count() <= max_chars {
        preview.to_string()
    } else {
        preview.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use indexmap::IndexMap;

    use crate::http::Verb;
    use crate::request::{ParamMap, RequestParameters};
    use crate::response::RawResponse;

    fn descriptor_with(parameters: RequestParameters) -> RequestDescriptor {
        RequestDescriptor {
            verb: Verb::Post,
            url: "https://api.test/v1/users".to_string(),
            parameters,
        }
    }

    #[test]
    fn test_request_record_shape() {
        let mut parameters = RequestParameters::new();
        parameters.headers.insert("X-Token".to_string(), "abc".to_string());
        parameters.query.insert("page".to_string(), "2".to_string());
        parameters.body = Some(Body::Raw(b"hello".to_vec()));

        let record = RequestArrayFormatter.format(&descriptor_with(parameters), 100);
        assert_eq!(record["verb"], "POST");
        assert_eq!(record["url"], "https://api.test/v1/users");
        assert_eq!(record["headers"]["X-Token"], "abc");
        assert_eq!(record["query"]["page"], "2");
        assert_eq!(record["body"], "hello");
    }

    #[test]
    fn test_body_preview_truncation() {
        let mut parameters = RequestParameters::new();
        parameters.body = Some(Body::Raw(vec![b'a'; 500]));

        let record = RequestArrayFormatter.format(&descriptor_with(parameters), 10);
        assert_eq!(record["body"].as_str().unwrap().len(), 10);
    }

    #[test]
    fn test_form_body_preview_is_urlencoded() {
        let mut fields = ParamMap::new();
        fields.insert("name".to_string(), "a b".to_string());
        let mut parameters = RequestParameters::new();
        parameters.body = Some(Body::Form(fields));

        let record = RequestArrayFormatter.format(&descriptor_with(parameters), 100);
        assert_eq!(record["body"], "name=a+b");
    }

    #[test]
    fn test_response_record_shape() {
        let mut headers = IndexMap::new();
        headers.insert("content-type".to_string(), "text/plain".to_string());
        let raw = RawResponse {
            status: 404,
            headers,
            body: Bytes::from_static(b"missing"),
        };
        let response = Response::new(Some(raw), descriptor_with(RequestParameters::new()));

        let record = ResponseArrayFormatter.format(&response);
        assert_eq!(record["status"], 404);
        assert_eq!(record["content_type"], "text/plain");
        assert_eq!(record["body"], "missing");
    }

    #[test]
    fn test_missing_response_emits_error_marker() {
        let response = Response::new(None, descriptor_with(RequestParameters::new()));
        let record = ResponseArrayFormatter.format(&response);
        assert_eq!(record["error"], "no response");
        assert!(record.get("status").is_none());
    }
}
