//! Price quotes for marketplace orders.
//!
//! A quote multiplies the work type base price by the page, subject, urgency
//! and originality factors, then adds flat add-on fees. The catalog tables are
//! immutable after start-up and shared between requests.

pub mod catalog;
mod config;
pub mod domain;
mod engine;
pub mod router;
pub mod service;
pub mod showcase;
pub mod throttle;

#[cfg(test)]
mod tests;

pub use catalog::{
    Catalog, CatalogEntry, CatalogIssue, CatalogTable, SelectionKind, SubjectEntry, UrgencyEntry,
    WorkTypeEntry,
};
pub use config::PricingConfig;
pub use domain::{OriginalityBand, PriceBreakdown, QuoteRequest, QuoteResult};
pub use engine::{QuoteEngine, QuoteError};
pub use router::{client_key, quote_router};
pub use service::{QuoteService, ServiceError};
pub use throttle::{
    Admission, ClientKey, QuoteThrottle, SlidingWindowThrottle, ThrottleError, Unthrottled,
};
