//! Synthetic social-proof figures shown next to a quote.
//!
//! Nothing in this module reflects real inventory or demand. The numbers are
//! presentation filler and must never feed pricing, routing, or analytics.

use rand::Rng;
use std::ops::RangeInclusive;

/// Range the "authors available now" badge is drawn from.
pub const AUTHORS_ONLINE: RangeInclusive<u32> = 15..=34;

/// Draws a fresh decorative author count. Empty ranges collapse to their start.
pub fn available_authors<R: Rng>(rng: &mut R, range: &RangeInclusive<u32>) -> u32 {
    if range.is_empty() {
        return *range.start();
    }
    rng.gen_range(range.clone())
}
