//! Bulk Price Adjustment
//!
//! Applies a percentage delta to every unit price across all variants in
//! one pass. Totals are recomputed from the adjusted unit prices; flat
//! service surcharges are left untouched.

use shared::models::PriceVariants;
use tracing::info;

use crate::utils::{AppError, AppResult};

use super::{recompute_summasi, to_decimal, to_f64};

/// Largest accepted adjustment magnitude, in percent
const MAX_ADJUSTMENT_PERCENT: f64 = 1000.0;

/// Apply a percentage adjustment to every tier's unit price.
///
/// `percent` may be negative; -100 zeroes every price. Returns the number
/// of tiers touched.
pub fn apply_percentage(variants: &mut PriceVariants, percent: f64) -> AppResult<usize> {
    if !percent.is_finite() || percent < -100.0 || percent > MAX_ADJUSTMENT_PERCENT {
        return Err(AppError::Validation(format!(
            "Adjustment must be between -100 and {} percent",
            MAX_ADJUSTMENT_PERCENT
        )));
    }

    let factor = to_decimal(1.0 + percent / 100.0);
    let mut adjusted = 0usize;

    for tiers in variants.values_mut() {
        for tier in tiers.iter_mut() {
            tier.narxi = to_f64(to_decimal(tier.narxi) * factor);
            tier.summasi = recompute_summasi(tier);
            adjusted += 1;
        }
    }

    info!(target: "pricing", percent, adjusted, "bulk price adjustment applied");
    Ok(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{AdditionalService, PriceTier};
    use uuid::Uuid;

    fn tier(soni: f64, narxi: f64) -> PriceTier {
        let mut t = PriceTier {
            id: Uuid::new_v4().to_string(),
            soni,
            narxi,
            summasi: 0.0,
            additional_services: None,
            izoh: None,
        };
        t.summasi = recompute_summasi(&t);
        t
    }

    #[test]
    fn test_plus_ten_percent() {
        let mut variants = PriceVariants::new();
        variants.insert("vizitka".to_string(), vec![tier(500.0, 800.0)]);

        let adjusted = apply_percentage(&mut variants, 10.0).unwrap();
        assert_eq!(adjusted, 1);
        let t = &variants["vizitka"][0];
        assert_eq!(t.narxi, 880.0);
        assert_eq!(t.summasi, 440_000.0);
    }

    #[test]
    fn test_negative_adjustment() {
        let mut variants = PriceVariants::new();
        variants.insert("vizitka".to_string(), vec![tier(100.0, 1000.0)]);

        apply_percentage(&mut variants, -25.0).unwrap();
        let t = &variants["vizitka"][0];
        assert_eq!(t.narxi, 750.0);
        assert_eq!(t.summasi, 75_000.0);
    }

    #[test]
    fn test_services_untouched() {
        let mut t = tier(100.0, 1000.0);
        t.additional_services = Some(vec![AdditionalService {
            id: Uuid::new_v4().to_string(),
            name: "Lak".to_string(),
            cost: 5000.0,
        }]);
        t.summasi = recompute_summasi(&t);
        let mut variants = PriceVariants::new();
        variants.insert("vizitka".to_string(), vec![t]);

        apply_percentage(&mut variants, 10.0).unwrap();
        let t = &variants["vizitka"][0];
        assert_eq!(t.narxi, 1100.0);
        let svc = &t.additional_services.as_ref().unwrap()[0];
        assert_eq!(svc.cost, 5000.0);
        assert_eq!(t.summasi, 115_000.0);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut variants = PriceVariants::new();
        assert!(apply_percentage(&mut variants, -150.0).is_err());
        assert!(apply_percentage(&mut variants, f64::NAN).is_err());
        assert!(apply_percentage(&mut variants, 5000.0).is_err());
    }

    #[test]
    fn test_spans_all_variants() {
        let mut variants = PriceVariants::new();
        variants.insert("vizitka".to_string(), vec![tier(100.0, 1000.0), tier(500.0, 800.0)]);
        variants.insert("buklet".to_string(), vec![tier(100.0, 2000.0)]);

        let adjusted = apply_percentage(&mut variants, 50.0).unwrap();
        assert_eq!(adjusted, 3);
        assert_eq!(variants["buklet"][0].narxi, 3000.0);
    }
}
