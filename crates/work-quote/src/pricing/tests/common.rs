use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::pricing::{
    Catalog, PricingConfig, QuoteEngine, QuoteRequest, QuoteService, SubjectEntry, Unthrottled,
    UrgencyEntry, WorkTypeEntry,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

pub(super) fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub(super) fn engine() -> QuoteEngine {
    QuoteEngine::new(Arc::new(Catalog::standard()), PricingConfig::default())
}

pub(super) fn request(work_type: &str, subject: &str, urgency: &str) -> QuoteRequest {
    QuoteRequest {
        work_type: work_type.to_string(),
        subject: subject.to_string(),
        urgency: urgency.to_string(),
        pages: 30,
        originality: 75,
        with_presentation: false,
        with_edits: false,
    }
}

pub(super) fn coursework_request() -> QuoteRequest {
    QuoteRequest {
        originality: 85,
        ..request("coursework", "programming", "normal")
    }
}

/// Single-entry catalog with a unit base price, handy for exact arithmetic.
pub(super) fn unit_catalog(subject_coefficient: f64) -> Catalog {
    Catalog::new(
        vec![WorkTypeEntry {
            id: "unit",
            label: "Unit",
            base_price: 1,
            icon: "dot",
        }],
        vec![SubjectEntry {
            id: "flat",
            label: "Flat",
            coefficient: subject_coefficient,
        }],
        vec![UrgencyEntry {
            id: "normal",
            label: "Normal",
            lead_time_days: 10,
            coefficient: 1.0,
        }],
    )
}

pub(super) fn unthrottled_service() -> QuoteService<Unthrottled> {
    QuoteService::new(engine(), Arc::new(Unthrottled))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
