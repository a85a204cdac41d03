//! Pricing Core Module
//!
//! The tier-based pricing model: key encoding, tier list maintenance,
//! breakpoint resolution, the LLM-facing table formatter and bulk
//! percentage adjustments.

pub mod adjust;
pub mod formatter;
pub mod key;
pub mod resolver;
pub mod tiers;

pub use adjust::*;
pub use formatter::*;
pub use key::*;
pub use resolver::*;
pub use tiers::*;

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub(crate) fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round to a whole amount (totals are whole currency units)
#[inline]
pub(crate) fn round_amount(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}
