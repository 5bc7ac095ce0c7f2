use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use tracing::warn;

use super::catalog::Catalog;
use super::domain::{QuoteRequest, QuoteResult};
use super::engine::{QuoteEngine, QuoteError};
use super::throttle::{Admission, ClientKey, QuoteThrottle, ThrottleError};

/// Service composing the quote engine with a per-client request budget.
pub struct QuoteService<T> {
    engine: Arc<QuoteEngine>,
    throttle: Arc<T>,
}

impl<T> QuoteService<T>
where
    T: QuoteThrottle + 'static,
{
    pub fn new(engine: QuoteEngine, throttle: Arc<T>) -> Self {
        Self {
            engine: Arc::new(engine),
            throttle,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.engine.catalog()
    }

    /// Price a request for `client`. The delivery date counts from the local
    /// calendar day of `now`.
    pub fn quote(
        &self,
        client: &ClientKey,
        request: &QuoteRequest,
        now: DateTime<Utc>,
    ) -> Result<QuoteResult, ServiceError> {
        if let Admission::Limited { retry_after_secs } = self.throttle.admit(client, now)? {
            warn!(client = %client.0, retry_after_secs, "quote request throttled");
            return Err(ServiceError::Throttled { retry_after_secs });
        }

        let today = now.with_timezone(&Local).date_naive();
        let result = self.engine.quote(request, today)?;
        Ok(result)
    }
}

/// Error raised by the quote service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("too many quote requests, retry in {retry_after_secs}s")]
    Throttled { retry_after_secs: u64 },
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error(transparent)]
    Throttle(#[from] ThrottleError),
}
