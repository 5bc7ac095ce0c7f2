use super::catalog::{Catalog, SelectionKind, SubjectEntry, UrgencyEntry, WorkTypeEntry};
use super::config::PricingConfig;
use super::domain::{OriginalityBand, PriceBreakdown, QuoteRequest, QuoteResult};
use super::showcase;
use chrono::{Days, NaiveDate};
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

const DELIVERY_LABEL_FORMAT: &str = "%d.%m.%Y";

/// Reason a quote could not be produced. No partial result accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("unknown {kind} '{id}'")]
    InvalidSelection { kind: SelectionKind, id: String },
    #[error("page count {pages} must be between 1 and {max}")]
    InvalidPages { pages: u32, max: u32 },
    #[error("originality {0}% must be between 0 and 100")]
    InvalidOriginality(u8),
}

impl QuoteError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            QuoteError::InvalidSelection { kind, .. } => kind.field(),
            QuoteError::InvalidPages { .. } => "pages",
            QuoteError::InvalidOriginality(_) => "originality",
        }
    }
}

struct Selection<'a> {
    work_type: &'a WorkTypeEntry,
    subject: &'a SubjectEntry,
    urgency: &'a UrgencyEntry,
}

/// Stateless pricing calculator over a shared catalog.
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    catalog: Arc<Catalog>,
    config: PricingConfig,
}

impl QuoteEngine {
    pub fn new(catalog: Arc<Catalog>, config: PricingConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn quote(
        &self,
        request: &QuoteRequest,
        today: NaiveDate,
    ) -> Result<QuoteResult, QuoteError> {
        self.quote_with_rng(request, today, &mut rand::thread_rng())
    }

    pub fn quote_with_rng<R: Rng>(
        &self,
        request: &QuoteRequest,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<QuoteResult, QuoteError> {
        let selection = self.resolve(request)?;
        self.check_bounds(request)?;

        let breakdown = self.breakdown(&selection, request);
        let total_price = breakdown.multiplied_price
            + u64::from(breakdown.presentation_fee)
            + u64::from(breakdown.edits_fee);

        let delivery_date = today
            .checked_add_days(Days::new(u64::from(selection.urgency.lead_time_days)))
            .unwrap_or(NaiveDate::MAX);
        let available_authors = showcase::available_authors(rng, &self.config.authors_online);

        debug!(
            work_type = selection.work_type.id,
            subject = selection.subject.id,
            urgency = selection.urgency.id,
            pages = request.pages,
            total_price,
            "quote computed"
        );

        Ok(QuoteResult {
            breakdown,
            total_price,
            delivery_date,
            delivery_label: delivery_date.format(DELIVERY_LABEL_FORMAT).to_string(),
            available_authors,
        })
    }

    fn resolve<'a>(&'a self, request: &QuoteRequest) -> Result<Selection<'a>, QuoteError> {
        let work_type = self.catalog.work_type(&request.work_type).ok_or_else(|| {
            QuoteError::InvalidSelection {
                kind: SelectionKind::WorkType,
                id: request.work_type.clone(),
            }
        })?;
        let subject =
            self.catalog
                .subject(&request.subject)
                .ok_or_else(|| QuoteError::InvalidSelection {
                    kind: SelectionKind::Subject,
                    id: request.subject.clone(),
                })?;
        let urgency =
            self.catalog
                .urgency(&request.urgency)
                .ok_or_else(|| QuoteError::InvalidSelection {
                    kind: SelectionKind::Urgency,
                    id: request.urgency.clone(),
                })?;

        Ok(Selection {
            work_type,
            subject,
            urgency,
        })
    }

    fn check_bounds(&self, request: &QuoteRequest) -> Result<(), QuoteError> {
        if request.pages == 0 || request.pages > self.config.max_pages {
            return Err(QuoteError::InvalidPages {
                pages: request.pages,
                max: self.config.max_pages,
            });
        }
        if request.originality > 100 {
            return Err(QuoteError::InvalidOriginality(request.originality));
        }
        Ok(())
    }

    fn breakdown(&self, selection: &Selection<'_>, request: &QuoteRequest) -> PriceBreakdown {
        let page_multiplier =
            f64::from(request.pages) / f64::from(self.config.baseline_pages.max(1));
        let originality_band = OriginalityBand::for_percentage(request.originality);
        let originality_multiplier = originality_band.multiplier();

        let raw_total = f64::from(selection.work_type.base_price)
            * page_multiplier
            * selection.subject.coefficient
            * selection.urgency.coefficient
            * originality_multiplier;

        // f64::round resolves .5 midpoints away from zero.
        let multiplied_price = raw_total.round().max(0.0) as u64;

        PriceBreakdown {
            base_price: selection.work_type.base_price,
            page_multiplier,
            subject_coefficient: selection.subject.coefficient,
            urgency_coefficient: selection.urgency.coefficient,
            originality_band,
            originality_multiplier,
            multiplied_price,
            presentation_fee: if request.with_presentation {
                self.config.presentation_fee
            } else {
                0
            },
            edits_fee: if request.with_edits {
                self.config.edits_fee
            } else {
                0
            },
        }
    }
}
