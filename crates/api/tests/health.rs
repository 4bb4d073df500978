//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::routing::get as get_route;
use axum::{middleware, Router};
use common::{body_json, build_test_app, build_test_app_with, get, post_json, send};
use serde_json::json;
use sevdash_api::error::json_timeout;
use tower::ServiceExt;
use tower_http::timeout::TimeoutLayer;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = build_test_app();
    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["uploads_ready"], true);
}

#[tokio::test]
async fn health_check_degraded_without_upload_dir() {
    let app = build_test_app();
    std::fs::remove_dir(&app.config.upload_dir).unwrap();

    let json = body_json(get(&app, "/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["uploads_ready"], false);
}

// ---------------------------------------------------------------------------
// Test: Unknown routes return the JSON 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404_json() {
    let app = build_test_app();
    let response = get(&app, "/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Not found");
}

#[tokio::test]
async fn unknown_post_route_returns_404_json() {
    let app = build_test_app();
    let response = post_json(&app, "/nope", &json!({})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Not found");
}

// ---------------------------------------------------------------------------
// Test: Known routes called with the wrong method return a JSON 405
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrong_method_on_known_route_returns_405_json() {
    let app = build_test_app();

    for (method, uri) in [(Method::DELETE, "/config"), (Method::GET, "/upload")] {
        let request = Request::builder()
            .method(method.clone())
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "Method not allowed", "{method} {uri}");
        assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
    }
}

// ---------------------------------------------------------------------------
// Test: Timed-out requests return a JSON 408
// ---------------------------------------------------------------------------

#[tokio::test]
async fn timed_out_request_returns_408_json() {
    let router = Router::new()
        .route(
            "/slow",
            get_route(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(20),
        ))
        .layer(middleware::map_response(json_timeout));

    let request = Request::builder().uri("/slow").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Request timed out");
    assert_eq!(json["code"], "TIMEOUT");
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app();
    let response = get(&app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a UUID string (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: CORS
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_wildcard_allows_any_origin() {
    let app = build_test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/config")
        .header("Origin", "http://dashboard.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header");
    assert_eq!(allow_origin, "*");
}

#[tokio::test]
async fn cors_origin_list_echoes_allowed_origin() {
    let app = build_test_app_with(|c| {
        c.cors_origins = vec!["http://localhost:5173".to_string()];
    });

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/data")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    let allow_methods = headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("GET"),
        "Allow-Methods should contain GET, got: {allow_methods}"
    );
}
