//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use klaxon_core::clock::Clock;
use klaxon_test_support::FixedClock;
use sqlx::PgPool;
use tower::ServiceExt;

use klaxon_api::routes;
use klaxon_api::state::AppState;

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router with the relational driver over a single
/// database serving as both write and read store. Uses the same route
/// structure as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let app_state = AppState::relational(pool.clone(), pool, fixed_clock());

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/alarms", routes::alarms::router())
        .with_state(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Poll a list endpoint until it returns at least `count` alarms. The read
/// stores are only eventually consistent with the write, so a single GET
/// right after a create may legitimately come back empty.
pub async fn wait_for_alarm_count(app: &Router, uri: &str, count: usize) -> serde_json::Value {
    for _ in 0..200 {
        let (status, json) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::OK);
        if json.as_array().is_some_and(|alarms| alarms.len() >= count) {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for {count} alarm(s) at {uri}");
}
