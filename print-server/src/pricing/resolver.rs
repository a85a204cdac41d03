//! Price Resolution
//!
//! Deterministic tier lookup: encodes the request's price-list key, picks
//! the first tier whose breakpoint covers the comparison value (ceiling
//! rule over the ascending tier list) and applies the urgency surcharge.
//! Used for order snapshots and as ground truth for the assistant's
//! arithmetic.

use shared::models::{
    CalculationResult, FormState, PriceTier, PriceVariants, PricingDimension, Product,
};
use tracing::debug;

use crate::utils::{AppError, AppResult};

use super::{encode_key, round_amount, to_decimal};

/// Comparison value the tier breakpoints are matched against
fn comparison_value(product: &Product, form: &FormState) -> AppResult<f64> {
    let quantity = form.quantity;
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(AppError::Validation(
            "quantity must be a positive number".to_string(),
        ));
    }

    match product.pricing_dimension {
        PricingDimension::Quantity => Ok(quantity),
        PricingDimension::AreaSqm => {
            if form.width <= 0.0 || form.height <= 0.0 {
                return Err(AppError::Validation(
                    "width and height must be positive for area-priced products".to_string(),
                ));
            }
            // mm² to m², times the number of copies
            Ok((form.width * form.height / 1_000_000.0) * quantity)
        }
        PricingDimension::PageCount => {
            let pages = form.page_count.unwrap_or(0.0);
            if pages <= 0.0 {
                return Err(AppError::Validation(
                    "pageCount must be a positive number".to_string(),
                ));
            }
            Ok(pages)
        }
    }
}

/// First tier whose breakpoint is >= the comparison value.
///
/// Assumes the list is sorted ascending; duplicate breakpoints resolve to
/// the first occurrence.
fn ceiling_tier(tiers: &[PriceTier], cmp: f64) -> Option<&PriceTier> {
    tiers.iter().find(|t| t.soni >= cmp)
}

/// Base amount before urgency, plus a human-readable trace line
fn base_amount(
    product: &Product,
    form: &FormState,
    tiers: &[PriceTier],
    cmp: f64,
) -> AppResult<(f64, String)> {
    let first = tiers
        .first()
        .ok_or_else(|| AppError::NoPriceTable(product.id.clone()))?;
    let last = tiers
        .last()
        .ok_or_else(|| AppError::NoPriceTable(product.id.clone()))?;

    if product.pricing_dimension == PricingDimension::PageCount {
        // Per-page pricing scales with both pages and copies. Tier selection
        // clamps to the table's range.
        let tier = ceiling_tier(tiers, cmp).unwrap_or(last);
        let pages = to_decimal(cmp);
        let copies = to_decimal(form.quantity);
        let base = round_amount(to_decimal(tier.narxi) * pages * copies) + tier.services_cost();
        let trace = format!(
            "{} sahifa x {} nusxa, {} so'm/sahifa (pog'ona: {})",
            cmp, form.quantity, tier.narxi, tier.soni
        );
        return Ok((base, trace));
    }

    match ceiling_tier(tiers, cmp) {
        Some(tier) => {
            if cmp < first.soni {
                // Below the smallest breakpoint the table floors at the
                // minimum order amount.
                let trace = format!(
                    "Minimal buyurtma: {} uchun jadvaldagi eng kichik pog'ona {} qo'llanildi",
                    cmp, first.soni
                );
                Ok((first.summasi, trace))
            } else {
                let trace = format!(
                    "Pog'ona {} (so'ralgan: {}), summa {}",
                    tier.soni, cmp, tier.summasi
                );
                Ok((tier.summasi, trace))
            }
        }
        None => {
            // Above the table's range: extrapolate with the best unit price.
            let base =
                round_amount(to_decimal(last.narxi) * to_decimal(cmp)) + last.services_cost();
            let trace = format!(
                "Jadvaldan tashqari ({} > {}): {} so'm birlik narxida hisoblandi",
                cmp, last.soni, last.narxi
            );
            Ok((base, trace))
        }
    }
}

/// Resolve a calculation request against the caller's price variants.
///
/// Fails with `NoPriceTable` when no tier list exists for the request's
/// key; the variant must match exactly, there is no fallback to a less
/// specific key.
pub fn resolve(
    product: &Product,
    form: &FormState,
    variants: &PriceVariants,
) -> AppResult<CalculationResult> {
    let attributes = form.pricing_attribute_map(&product.pricing_attributes);
    let key = encode_key(&product.id, &attributes);

    let tiers = variants
        .get(&key)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::NoPriceTable(key.clone()))?;

    let cmp = comparison_value(product, form)?;
    let (base, trace) = base_amount(product, form, tiers, cmp)?;

    let multiplier = form.urgency.multiplier();
    let total = round_amount(to_decimal(base) * to_decimal(multiplier));

    debug!(
        target: "pricing",
        key = %key,
        cmp,
        base,
        total,
        "resolved price"
    );

    let explanation = if multiplier > 1.0 {
        format!(
            "Jadval: {}. {}. Shoshilinchlik x{}: jami {} so'm",
            key, trace, multiplier, total
        )
    } else {
        format!("Jadval: {}. {}. Jami {} so'm", key, trace, total)
    };

    Ok(CalculationResult {
        items_per_sheet: 0.0,
        total_sheets: 0.0,
        material_cost: 0.0,
        printing_cost: 0.0,
        post_press_cost: 0.0,
        total_cost: total,
        unfolded_dimensions: None,
        nesting_layout: Vec::new(),
        advice: None,
        preflight_check: None,
        calculation_explanation: explanation,
        request_data: form.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{PricingAttribute, Urgency};
    use uuid::Uuid;

    fn tier(soni: f64, narxi: f64) -> PriceTier {
        PriceTier {
            id: Uuid::new_v4().to_string(),
            soni,
            narxi,
            summasi: (soni * narxi).round(),
            additional_services: None,
            izoh: None,
        }
    }

    fn quantity_product() -> Product {
        Product {
            id: "vizitka".to_string(),
            name: "Vizitka".to_string(),
            description: String::new(),
            icon: "credit-card".to_string(),
            fields: Vec::new(),
            pricing_dimension: PricingDimension::Quantity,
            pricing_attributes: vec![PricingAttribute::Material],
            default_state: None,
        }
    }

    fn variants_for(key: &str, tiers: Vec<PriceTier>) -> PriceVariants {
        let mut v = PriceVariants::new();
        v.insert(key.to_string(), tiers);
        v
    }

    fn form(quantity: f64) -> FormState {
        FormState {
            product_type: "vizitka".to_string(),
            material: "coated-300".to_string(),
            quantity,
            ..FormState::default()
        }
    }

    #[test]
    fn test_ceiling_picks_next_breakpoint() {
        let variants = variants_for(
            "vizitka:material=coated-300",
            vec![tier(100.0, 1000.0), tier(500.0, 800.0), tier(1000.0, 700.0)],
        );
        let result = resolve(&quantity_product(), &form(300.0), &variants).unwrap();
        assert_eq!(result.total_cost, 400_000.0);
    }

    #[test]
    fn test_exact_breakpoint_match() {
        let variants = variants_for(
            "vizitka:material=coated-300",
            vec![tier(100.0, 1000.0), tier(500.0, 800.0)],
        );
        let result = resolve(&quantity_product(), &form(500.0), &variants).unwrap();
        assert_eq!(result.total_cost, 400_000.0);
    }

    #[test]
    fn test_below_range_floors_at_minimum() {
        let variants = variants_for(
            "vizitka:material=coated-300",
            vec![tier(100.0, 1000.0), tier(500.0, 800.0)],
        );
        let result = resolve(&quantity_product(), &form(50.0), &variants).unwrap();
        assert_eq!(result.total_cost, 100_000.0);
    }

    #[test]
    fn test_above_range_extrapolates_best_unit_price() {
        let variants = variants_for(
            "vizitka:material=coated-300",
            vec![tier(100.0, 1000.0), tier(1000.0, 700.0)],
        );
        let result = resolve(&quantity_product(), &form(5000.0), &variants).unwrap();
        assert_eq!(result.total_cost, 3_500_000.0);
    }

    #[test]
    fn test_750_rounds_up_to_1000_tier() {
        let variants = variants_for(
            "vizitka:material=coated-300",
            vec![tier(100.0, 1000.0), tier(500.0, 800.0), tier(1000.0, 700.0)],
        );
        let result = resolve(&quantity_product(), &form(750.0), &variants).unwrap();
        assert_eq!(result.total_cost, 700_000.0);
    }

    #[test]
    fn test_urgency_surcharge() {
        let variants = variants_for(
            "vizitka:material=coated-300",
            vec![tier(100.0, 1000.0)],
        );
        let mut request = form(100.0);
        request.urgency = Urgency::Express;
        let result = resolve(&quantity_product(), &request, &variants).unwrap();
        assert_eq!(result.total_cost, 125_000.0);

        request.urgency = Urgency::SuperExpress;
        let result = resolve(&quantity_product(), &request, &variants).unwrap();
        assert_eq!(result.total_cost, 150_000.0);
    }

    #[test]
    fn test_resolution_is_repeatable() {
        // The surcharge multiplies the base amount, never a prior result:
        // resolving the same request again yields the identical total
        let variants = variants_for(
            "vizitka:material=coated-300",
            vec![tier(100.0, 1000.0)],
        );
        let mut request = form(100.0);
        request.urgency = Urgency::Express;
        let first = resolve(&quantity_product(), &request, &variants).unwrap();
        let second = resolve(&quantity_product(), &request, &variants).unwrap();
        assert_eq!(first.total_cost, second.total_cost);
        assert_eq!(first.total_cost, 125_000.0);
        assert_eq!(
            first.calculation_explanation,
            second.calculation_explanation
        );
    }

    #[test]
    fn test_missing_variant_is_no_price_table() {
        let variants = PriceVariants::new();
        let err = resolve(&quantity_product(), &form(100.0), &variants).unwrap_err();
        assert!(matches!(err, AppError::NoPriceTable(_)));

        // Present but empty counts as missing too
        let variants = variants_for("vizitka:material=coated-300", Vec::new());
        let err = resolve(&quantity_product(), &form(100.0), &variants).unwrap_err();
        assert!(matches!(err, AppError::NoPriceTable(_)));
    }

    #[test]
    fn test_other_material_falls_back_to_bare_key() {
        // `other` is dropped from the key, so the bare product table applies
        let variants = variants_for("vizitka", vec![tier(100.0, 1200.0)]);
        let mut request = form(100.0);
        request.material = "other".to_string();
        request.custom_material = Some("Kraft qog'oz".to_string());
        let result = resolve(&quantity_product(), &request, &variants).unwrap();
        assert_eq!(result.total_cost, 120_000.0);
    }

    #[test]
    fn test_area_priced_product() {
        let product = Product {
            id: "banner".to_string(),
            pricing_dimension: PricingDimension::AreaSqm,
            pricing_attributes: vec![PricingAttribute::Material],
            ..quantity_product()
        };
        let variants = variants_for(
            "banner:material=banner-440",
            vec![tier(1.0, 50_000.0), tier(10.0, 40_000.0)],
        );
        // 2000mm x 1000mm x 2 copies = 4 m² -> 10 m² tier
        let request = FormState {
            product_type: "banner".to_string(),
            material: "banner-440".to_string(),
            width: 2000.0,
            height: 1000.0,
            quantity: 2.0,
            ..FormState::default()
        };
        let result = resolve(&product, &request, &variants).unwrap();
        assert_eq!(result.total_cost, 400_000.0);
    }

    #[test]
    fn test_page_count_priced_product() {
        let product = Product {
            id: "kitob".to_string(),
            pricing_dimension: PricingDimension::PageCount,
            pricing_attributes: vec![PricingAttribute::BindingType],
            ..quantity_product()
        };
        let variants = variants_for(
            "kitob:bindingType=perfect-binding",
            vec![tier(100.0, 200.0), tier(300.0, 150.0)],
        );
        let request = FormState {
            product_type: "kitob".to_string(),
            quantity: 10.0,
            page_count: Some(250.0),
            binding_type: Some("perfect-binding".to_string()),
            ..FormState::default()
        };
        // 250 pages -> 300-page tier, 150 so'm/page x 250 x 10 copies
        let result = resolve(&product, &request, &variants).unwrap();
        assert_eq!(result.total_cost, 375_000.0);
    }

    #[test]
    fn test_explanation_names_the_table() {
        let variants = variants_for(
            "vizitka:material=coated-300",
            vec![tier(100.0, 1000.0)],
        );
        let result = resolve(&quantity_product(), &form(100.0), &variants).unwrap();
        assert!(result
            .calculation_explanation
            .contains("vizitka:material=coated-300"));
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let variants = variants_for("vizitka:material=coated-300", vec![tier(100.0, 1000.0)]);
        let err = resolve(&quantity_product(), &form(0.0), &variants).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
