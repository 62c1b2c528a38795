//! Status classification and transport failure handling
mod common;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use apiwrap::{ApiClient, ApiConfig, ApiwrapError};

#[tokio::test]
async fn test_registered_status_maps_to_http_exception() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing resource"))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiConfig::new(server.uri()).http_exception(404, "not_found");
    let mut client = ApiClient::new(config).unwrap();

    let err = client.get("users/99").await.unwrap_err();
    match err {
        ApiwrapError::HttpException { status, kind, response } => {
            assert_eq!(status, 404);
            assert_eq!(kind, "not_found");
            // The classified response still carries the full body
            assert_eq!(response.text().as_deref(), Some("missing resource"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unregistered_status_is_returned_as_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/99"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiConfig::new(server.uri()).http_exception(500, "server_error");
    let mut client = ApiClient::new(config).unwrap();

    let response = client.get("users/99").await.unwrap();
    assert_eq!(response.status(), Some(404));
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_skip_all_exceptions_lasts_one_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/99"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let config = ApiConfig::new(server.uri()).http_exception(404, "not_found");
    let mut client = ApiClient::new(config).unwrap();

    let response = client.skip_http_exceptions(&[]).get("users/99").await.unwrap();
    assert_eq!(response.status(), Some(404));

    // The override was consumed; the base table applies again
    let err = client.get("users/99").await.unwrap_err();
    assert!(matches!(err, ApiwrapError::HttpException { status: 404, .. }));
}

#[tokio::test]
async fn test_skip_list_removes_only_listed_codes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = ApiConfig::new(server.uri())
        .http_exception(404, "not_found")
        .http_exception(500, "server_error");
    let mut client = ApiClient::new(config).unwrap();

    let response = client.skip_http_exceptions(&[404]).get("missing").await.unwrap();
    assert_eq!(response.status(), Some(404));

    let err = client.skip_http_exceptions(&[404]).get("broken").await.unwrap_err();
    assert!(matches!(err, ApiwrapError::HttpException { status: 500, .. }));
}

#[tokio::test]
async fn test_push_exceptions_apply_to_one_call_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/teapot"))
        .respond_with(ResponseTemplate::new(418))
        .expect(2)
        .mount(&server)
        .await;

    let mut client = ApiClient::new(ApiConfig::new(server.uri())).unwrap();

    let err = client
        .push_http_exceptions([(418, "teapot")])
        .get("teapot")
        .await
        .unwrap_err();
    match err {
        ApiwrapError::HttpException { status, kind, .. } => {
            assert_eq!(status, 418);
            assert_eq!(kind, "teapot");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // The pushed entry never touches the base table
    let response = client.get("teapot").await.unwrap();
    assert_eq!(response.status(), Some(418));
}

#[tokio::test]
async fn test_connection_failure_yields_transport_error() {
    // Port 9 (discard) refuses connections
    let mut client = ApiClient::new(ApiConfig::new("http://127.0.0.1:9")).unwrap();

    let err = client.get("users").await.unwrap_err();
    match &err {
        ApiwrapError::Transport { response, .. } => {
            assert!(!response.has_response());
            assert_eq!(response.status(), None);
            assert!(response.contents().is_none());
            assert_eq!(response.request().verb.as_str(), "GET");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.response().is_none());
}

#[tokio::test]
async fn test_classified_error_exposes_response_accessor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/99"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("Content-Type", "application/json")
                .set_body_raw(r#"{"error":"gone"}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiConfig::new(server.uri()).http_exception(404, "not_found");
    let mut client = ApiClient::new(config).unwrap();

    let err = client.get("users/99").await.unwrap_err();
    let response = err.response().unwrap();
    assert_eq!(response.status(), Some(404));
    assert_eq!(response.content_type(), Some("application/json"));
    let body = response.json().unwrap();
    assert_eq!(body["error"], "gone");
}
