//! Integration tests for the web routes.
//!
//! Tests drive the axum `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. The store behind the handlers is the in-memory
//! implementation, so assertions can inspect what was appended.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use openspace_events::{EventQuery, EventStore, InMemoryEventStore};
use openspace_web::{routes, AppState};
use tower::ServiceExt;

fn test_app() -> (Router, Arc<InMemoryEventStore>) {
    let store = InMemoryEventStore::new_arc();
    let state = AppState::new(store.clone()).expect("templates load");
    (routes::router(state), store)
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

#[tokio::test]
async fn index_redirects_to_create_space() {
    let (app, _store) = test_app();

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/create_space"
    );
}

#[tokio::test]
async fn create_space_form_embeds_a_fresh_id() {
    let (app, _store) = test_app();

    let response = app
        .oneshot(Request::get("/create_space").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains(r#"name="id""#));
    assert!(html.contains(r#"name="spaceName""#));
}

#[tokio::test]
async fn blank_space_name_is_rejected_before_the_store() {
    let (app, store) = test_app();

    let response = app
        .oneshot(form_post("/create_space", "spaceName=++&id=evt-1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_to_string(response.into_body()).await;
    assert_eq!(body, "Space name is required");
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn create_space_appends_and_renders_confirmation() {
    let (app, store) = test_app();

    let response = app
        .oneshot(form_post("/create_space", "spaceName=RustConf&id=evt-1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("RustConf"));

    let events = store.read(&EventQuery::new()).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type(), "OpenSpaceNamedEvent");
    assert_eq!(events[0].id().as_str(), "evt-1");
}

#[tokio::test]
async fn retrying_a_form_submission_is_absorbed() {
    let (app, store) = test_app();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(form_post("/create_space", "spaceName=RustConf&id=evt-1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn set_dates_round_trip() {
    let (app, store) = test_app();

    let response = app
        .oneshot(form_post(
            "/set_dates",
            "startDate=2024-06-01&endDate=2024-06-02&id=d1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("2024-06-01"));
    assert!(html.contains("2024-06-02"));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn submitted_topics_are_listed_in_order() {
    let (app, _store) = test_app();

    app.clone()
        .oneshot(form_post(
            "/submit_topic",
            "name=Alice&category=talk&topic=Ownership&id=t1",
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(form_post(
            "/submit_topic",
            "name=Bob&category=workshop&topic=Lifetimes&id=t2",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;

    let first = html.find("Ownership").expect("first topic listed");
    let second = html.find("Lifetimes").expect("second topic listed");
    assert!(first < second);
}
