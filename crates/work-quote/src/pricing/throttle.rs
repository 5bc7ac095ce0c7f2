use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Identifies the caller a quote budget is tracked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientKey(pub String);

impl ClientKey {
    pub fn anonymous() -> Self {
        Self("anonymous".to_string())
    }
}

/// Outcome of asking the throttle for room to compute one more quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Limited { retry_after_secs: u64 },
}

/// Request budget abstraction so the service can be exercised in isolation.
pub trait QuoteThrottle: Send + Sync {
    fn admit(&self, client: &ClientKey, now: DateTime<Utc>) -> Result<Admission, ThrottleError>;
}

/// Throttle store failure.
#[derive(Debug, thiserror::Error)]
pub enum ThrottleError {
    #[error("throttle state unavailable: {0}")]
    Unavailable(String),
}

/// Admits every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unthrottled;

impl QuoteThrottle for Unthrottled {
    fn admit(&self, _client: &ClientKey, _now: DateTime<Utc>) -> Result<Admission, ThrottleError> {
        Ok(Admission::Allowed)
    }
}

/// In-memory sliding window: at most `limit` admissions per client per `window`.
///
/// State lives for as long as the owning server; nothing is persisted.
#[derive(Debug)]
pub struct SlidingWindowThrottle {
    limit: usize,
    window: Duration,
    recent: Mutex<HashMap<ClientKey, VecDeque<DateTime<Utc>>>>,
}

impl SlidingWindowThrottle {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            recent: Mutex::new(HashMap::new()),
        }
    }

    /// Number of clients currently holding at least one timestamp.
    pub fn tracked_clients(&self) -> usize {
        self.recent
            .lock()
            .map(|guard| guard.len())
            .unwrap_or_default()
    }

    /// Drops clients whose whole history fell out of the window.
    pub fn sweep(&self, now: DateTime<Utc>) -> Result<usize, ThrottleError> {
        let mut guard = self
            .recent
            .lock()
            .map_err(|err| ThrottleError::Unavailable(err.to_string()))?;
        let before = guard.len();
        guard.retain(|_, stamps| {
            prune(stamps, now - self.window);
            !stamps.is_empty()
        });
        Ok(before - guard.len())
    }
}

fn prune(stamps: &mut VecDeque<DateTime<Utc>>, cutoff: DateTime<Utc>) {
    while stamps.front().is_some_and(|stamp| *stamp <= cutoff) {
        stamps.pop_front();
    }
}

fn whole_seconds_ceil(wait: Duration) -> u64 {
    let millis = wait.num_milliseconds().max(1);
    ((millis + 999) / 1000) as u64
}

impl QuoteThrottle for SlidingWindowThrottle {
    fn admit(&self, client: &ClientKey, now: DateTime<Utc>) -> Result<Admission, ThrottleError> {
        let mut guard = self
            .recent
            .lock()
            .map_err(|err| ThrottleError::Unavailable(err.to_string()))?;
        let stamps = guard.entry(client.clone()).or_default();
        prune(stamps, now - self.window);

        if stamps.len() >= self.limit {
            let wait = stamps
                .front()
                .map(|oldest| *oldest + self.window - now)
                .unwrap_or(self.window);
            let retry_after_secs = whole_seconds_ceil(wait);
            return Ok(Admission::Limited { retry_after_secs });
        }

        stamps.push_back(now);
        Ok(Admission::Allowed)
    }
}
