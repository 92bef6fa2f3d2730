use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::quiz::matching::{MatchingMode, FALLBACK_TITLE};
use crate::quiz::router::{recommendation_router, submit_handler};
use crate::quiz::service::SubmitRequest;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn get_returns_public_catalog() {
    let router = recommendation_router(Arc::new(service()));

    let response = router
        .oneshot(
            Request::get("/api/recommend")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["version"], 1);
    assert_eq!(payload["questions"][0]["id"], "where_craft");
    assert_eq!(payload["flow"][0], "where_craft");
}

#[tokio::test]
async fn post_with_responses_returns_persona() {
    let router = recommendation_router(Arc::new(service()));

    let response = router
        .oneshot(post_json(
            "/api/recommend",
            json!({ "responses": { "mess": ["mess_joyful"] } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["result"]["title"], "Chaos Crafter");
    assert!(payload["result"]["blurb"].is_string());
}

#[tokio::test]
async fn post_with_legacy_answers_returns_fallback_when_unmatched() {
    let router = recommendation_router(Arc::new(service()));

    let response = router
        .oneshot(post_json(
            "/api/recommend",
            json!({ "answers": { "mess": "mess_low_cleaning" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["result"]["title"], FALLBACK_TITLE);
}

#[tokio::test]
async fn post_in_describe_mode_returns_paragraph() {
    let router = recommendation_router(Arc::new(service_with_rules(None)));

    let response = router
        .oneshot(post_json(
            "/api/recommend",
            json!({ "mode": "describe", "responses": { "where_craft": ["where_tv"] } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let paragraph = payload["result"]["paragraph"]
        .as_str()
        .expect("paragraph present");
    assert!(paragraph.contains("In front of the TV"));
}

#[tokio::test]
async fn submit_handler_hides_missing_configuration_behind_generic_error() {
    let service = Arc::new(service_with_rules(None));

    let response = submit_handler(
        State(service),
        Ok(Json(SubmitRequest::new(responses(&[]), MatchingMode::Rules))),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "error": "Server error" }));
}

#[tokio::test]
async fn malformed_body_gets_generic_server_error() {
    let router = recommendation_router(Arc::new(service()));

    let response = router
        .oneshot(
            Request::post("/api/recommend")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "error": "Server error" }));
}

#[tokio::test]
async fn mistyped_responses_get_generic_server_error() {
    for uri in ["/api/recommend", "/api/recommend/summary"] {
        let router = recommendation_router(Arc::new(service()));

        let response = router
            .oneshot(post_json(uri, json!({ "responses": { "mess": "mess_joyful" } })))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload = read_json_body(response).await;
        assert_eq!(payload, json!({ "error": "Server error" }));
    }
}

#[tokio::test]
async fn summary_route_counts_answers() {
    let router = recommendation_router(Arc::new(service()));

    let response = router
        .oneshot(post_json(
            "/api/recommend/summary",
            json!({ "responses": { "where_craft": ["where_tv"], "space": [] } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["captured"], 2);
    assert_eq!(payload["answered"], 1);
    assert_eq!(payload["answers"][0]["option_labels"][0], "In front of the TV");
    assert_eq!(payload["answers"][1]["status"], "skipped");
}
