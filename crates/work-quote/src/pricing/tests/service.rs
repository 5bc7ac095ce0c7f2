use super::common::*;
use crate::pricing::{
    Admission, ClientKey, QuoteError, QuoteService, QuoteThrottle, SelectionKind, ServiceError,
    SlidingWindowThrottle, ThrottleError,
};
use chrono::{DateTime, Duration, Local, Utc};
use std::sync::Arc;

struct BrokenThrottle;

impl QuoteThrottle for BrokenThrottle {
    fn admit(&self, _client: &ClientKey, _now: DateTime<Utc>) -> Result<Admission, ThrottleError> {
        Err(ThrottleError::Unavailable("store offline".to_string()))
    }
}

#[test]
fn quote_counts_delivery_from_local_calendar_day() {
    let service = unthrottled_service();
    let now = Utc::now();

    let result = service
        .quote(&ClientKey::anonymous(), &coursework_request(), now)
        .expect("quote computes");

    let expected = now.with_timezone(&Local).date_naive() + Duration::days(10);
    assert_eq!(result.delivery_date, expected);
    assert_eq!(result.total_price, 936);
}

#[test]
fn quote_propagates_invalid_selection() {
    let service = unthrottled_service();
    let request = request("coursework", "programming", "tomorrow");

    match service.quote(&ClientKey::anonymous(), &request, Utc::now()) {
        Err(ServiceError::Quote(QuoteError::InvalidSelection { kind, .. })) => {
            assert_eq!(kind, SelectionKind::Urgency);
        }
        other => panic!("expected invalid selection, got {other:?}"),
    }
}

#[test]
fn quote_is_throttled_once_budget_is_spent() {
    let throttle = Arc::new(SlidingWindowThrottle::new(2, Duration::seconds(60)));
    let service = QuoteService::new(engine(), throttle.clone());
    let client = ClientKey("203.0.113.9".to_string());
    let now = Utc::now();

    for _ in 0..2 {
        service
            .quote(&client, &coursework_request(), now)
            .expect("within budget");
    }

    match service.quote(&client, &coursework_request(), now) {
        Err(ServiceError::Throttled { retry_after_secs }) => assert_eq!(retry_after_secs, 60),
        other => panic!("expected throttling, got {other:?}"),
    }
    assert!(service
        .quote(&ClientKey::anonymous(), &coursework_request(), now)
        .is_ok());
    assert_eq!(throttle.tracked_clients(), 2);
}

#[test]
fn throttle_failures_surface_as_service_errors() {
    let service = QuoteService::new(engine(), Arc::new(BrokenThrottle));

    match service.quote(&ClientKey::anonymous(), &coursework_request(), Utc::now()) {
        Err(ServiceError::Throttle(ThrottleError::Unavailable(reason))) => {
            assert_eq!(reason, "store offline");
        }
        other => panic!("expected throttle failure, got {other:?}"),
    }
}

#[test]
fn catalog_is_shared_with_the_engine() {
    let service = unthrottled_service();
    assert_eq!(service.catalog().work_types.len(), 7);
    assert!(service.catalog().urgency("express").is_some());
}
