use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::QuoteRequest;
use super::service::{QuoteService, ServiceError};
use super::throttle::{ClientKey, QuoteThrottle};

/// Router builder exposing the catalog and quote endpoints.
pub fn quote_router<T>(service: Arc<QuoteService<T>>) -> Router
where
    T: QuoteThrottle + 'static,
{
    Router::new()
        .route("/api/v1/catalog", get(catalog_handler::<T>))
        .route("/api/v1/quote", post(quote_handler::<T>))
        .with_state(service)
}

/// First `x-forwarded-for` hop, or the shared anonymous bucket.
pub fn client_key(headers: &HeaderMap) -> ClientKey {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .map(|hop| ClientKey(hop.to_string()))
        .unwrap_or_else(ClientKey::anonymous)
}

pub(crate) async fn catalog_handler<T>(State(service): State<Arc<QuoteService<T>>>) -> Response
where
    T: QuoteThrottle + 'static,
{
    (StatusCode::OK, axum::Json(service.catalog())).into_response()
}

pub(crate) async fn quote_handler<T>(
    State(service): State<Arc<QuoteService<T>>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response
where
    T: QuoteThrottle + 'static,
{
    let client = client_key(&headers);
    match service.quote(&client, &request, Utc::now()) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(ServiceError::Quote(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ServiceError::Throttled { retry_after_secs }) => {
            let payload = json!({
                "error": "too many quote requests",
                "retry_after_secs": retry_after_secs,
            });
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                axum::Json(payload),
            )
                .into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
