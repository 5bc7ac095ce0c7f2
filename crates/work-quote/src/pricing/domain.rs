use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Selections made on the quote form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub work_type: String,
    pub subject: String,
    pub urgency: String,
    pub pages: u32,
    /// Target uniqueness percentage, 0 through 100.
    pub originality: u8,
    #[serde(default)]
    pub with_presentation: bool,
    #[serde(default)]
    pub with_edits: bool,
}

/// Discrete uniqueness tiers. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginalityBand {
    Relaxed,
    Standard,
    High,
}

impl OriginalityBand {
    pub const fn for_percentage(originality: u8) -> Self {
        if originality >= 80 {
            Self::High
        } else if originality >= 70 {
            Self::Standard
        } else {
            Self::Relaxed
        }
    }

    pub const fn multiplier(self) -> f64 {
        match self {
            Self::High => 1.2,
            Self::Standard => 1.0,
            Self::Relaxed => 0.9,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "80% and above",
            Self::Standard => "70-79%",
            Self::Relaxed => "below 70%",
        }
    }
}

/// Every contribution to the final price, in the order it was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: u32,
    pub page_multiplier: f64,
    pub subject_coefficient: f64,
    pub urgency_coefficient: f64,
    pub originality_band: OriginalityBand,
    pub originality_multiplier: f64,
    /// Rounded product of the multiplicative chain, before add-on fees.
    pub multiplied_price: u64,
    pub presentation_fee: u32,
    pub edits_fee: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub breakdown: PriceBreakdown,
    pub total_price: u64,
    pub delivery_date: NaiveDate,
    pub delivery_label: String,
    /// Decorative badge figure, see [`crate::pricing::showcase`].
    pub available_authors: u32,
}

impl QuoteResult {
    /// Compares everything except the decorative author count.
    pub fn same_price(&self, other: &QuoteResult) -> bool {
        self.breakdown == other.breakdown
            && self.total_price == other.total_price
            && self.delivery_date == other.delivery_date
    }
}
