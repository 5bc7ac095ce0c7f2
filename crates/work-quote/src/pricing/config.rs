use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Tunable constants of the quote arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Page count the work type base price is defined for.
    pub baseline_pages: u32,
    pub max_pages: u32,
    pub presentation_fee: u32,
    pub edits_fee: u32,
    pub authors_online: RangeInclusive<u32>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            baseline_pages: 30,
            max_pages: 1000,
            presentation_fee: 300,
            edits_fee: 150,
            authors_online: super::showcase::AUTHORS_ONLINE,
        }
    }
}
