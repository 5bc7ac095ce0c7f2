use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode};
use chrono::Duration;
use std::sync::Arc;
use tower::ServiceExt;

use crate::pricing::router::quote_handler;
use crate::pricing::{
    client_key, quote_router, ClientKey, QuoteRequest, QuoteService, SlidingWindowThrottle,
    Unthrottled,
};

fn post_quote(request: &QuoteRequest) -> Request<Body> {
    Request::post("/api/v1/quote")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(request).expect("request serializes"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn catalog_route_lists_all_tables() {
    let router = quote_router(Arc::new(unthrottled_service()));

    let response = router
        .oneshot(
            Request::get("/api/v1/catalog")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["work_types"].as_array().map(Vec::len), Some(7));
    assert_eq!(body["urgencies"][4]["id"], "express");
}

#[tokio::test]
async fn quote_route_returns_priced_result() {
    let router = quote_router(Arc::new(unthrottled_service()));

    let response = router
        .oneshot(post_quote(&coursework_request()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total_price"], 936);
    assert_eq!(body["breakdown"]["originality_band"], "high");
    assert!(body["available_authors"].as_u64().is_some());
}

#[tokio::test]
async fn quote_route_accepts_payloads_without_add_ons() {
    let router = quote_router(Arc::new(unthrottled_service()));
    let payload = serde_json::json!({
        "work_type": "essay",
        "subject": "humanities",
        "urgency": "normal",
        "pages": 15,
        "originality": 60,
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/quote")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total_price"], 135);
    assert_eq!(body["breakdown"]["presentation_fee"], 0);
}

#[tokio::test]
async fn quote_handler_returns_unprocessable_for_unknown_subject() {
    let service = Arc::new(unthrottled_service());

    let response = quote_handler::<Unthrottled>(
        State(service),
        HeaderMap::new(),
        axum::Json(request("essay", "alchemy", "normal")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["field"], "subject");
    assert_eq!(body["error"], "unknown subject 'alchemy'");
}

#[tokio::test]
async fn quote_handler_returns_too_many_requests_with_retry_after() {
    let throttle = Arc::new(SlidingWindowThrottle::new(1, Duration::seconds(60)));
    let service = Arc::new(QuoteService::new(engine(), throttle));
    let mut headers = HeaderMap::new();
    headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.4"));

    let first = quote_handler::<SlidingWindowThrottle>(
        State(service.clone()),
        headers.clone(),
        axum::Json(coursework_request()),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = quote_handler::<SlidingWindowThrottle>(
        State(service),
        headers,
        axum::Json(coursework_request()),
    )
    .await;
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        second.headers().get(header::RETRY_AFTER),
        Some(&HeaderValue::from_static("60"))
    );
}

#[test]
fn client_key_uses_first_forwarded_hop() {
    let mut headers = HeaderMap::new();
    assert_eq!(client_key(&headers), ClientKey::anonymous());

    headers.insert(
        "x-forwarded-for",
        HeaderValue::from_static(" 203.0.113.7 , 10.0.0.1"),
    );
    assert_eq!(client_key(&headers), ClientKey("203.0.113.7".to_string()));

    headers.insert("x-forwarded-for", HeaderValue::from_static(""));
    assert_eq!(client_key(&headers), ClientKey::anonymous());
}
