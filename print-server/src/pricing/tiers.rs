//! Tier List Maintenance
//!
//! Mutations over a single variant's tier list: inserting breakpoints,
//! editing tier fields with derived-field recomputation, attaching flat
//! services and duplicating whole variants.

use shared::models::{AdditionalService, PriceTier, PriceVariants};
use uuid::Uuid;

use crate::utils::{AppError, AppResult, validation};

use super::{round_amount, to_decimal, to_f64};

/// Editable tier field, with the derived-field recomputation each implies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierField {
    /// Breakpoint quantity; recomputes summasi from narxi
    Soni,
    /// Unit price; recomputes summasi
    Narxi,
    /// Total amount; back-solves narxi
    Summasi,
}

/// Recompute `summasi` from the tier's breakpoint, unit price and services
pub fn recompute_summasi(tier: &PriceTier) -> f64 {
    let base = round_amount(to_decimal(tier.soni) * to_decimal(tier.narxi));
    base + tier.services_cost()
}

/// Back-solve `narxi` from an edited `summasi`, services excluded
fn recompute_narxi(tier: &PriceTier) -> f64 {
    if tier.soni == 0.0 {
        return 0.0;
    }
    let services = to_decimal(tier.services_cost());
    to_f64((to_decimal(tier.summasi) - services) / to_decimal(tier.soni))
}

/// Insert a new tier at the given breakpoint, keeping the list sorted.
///
/// Rejects a breakpoint already present in the list; callers that want a
/// different price at an existing breakpoint edit that tier instead.
pub fn add_tier(tiers: &mut Vec<PriceTier>, soni: f64, narxi: f64) -> AppResult<String> {
    validation::validate_positive(soni, "soni")?;
    validation::validate_non_negative(narxi, "narxi")?;

    if tiers.iter().any(|t| t.soni == soni) {
        return Err(AppError::Conflict(format!(
            "A tier with breakpoint {} already exists",
            soni
        )));
    }

    let mut tier = PriceTier {
        id: Uuid::new_v4().to_string(),
        soni,
        narxi,
        summasi: 0.0,
        additional_services: None,
        izoh: None,
    };
    tier.summasi = recompute_summasi(&tier);
    let id = tier.id.clone();

    tiers.push(tier);
    sort_tiers(tiers);
    Ok(id)
}

/// Edit one numeric field of a tier, recomputing the derived field.
///
/// Editing soni or narxi recomputes summasi; editing summasi back-solves
/// narxi so the invariant `summasi = round(soni * narxi) + services` is
/// restored from the operator's point of view.
pub fn update_tier_field(
    tiers: &mut Vec<PriceTier>,
    tier_id: &str,
    field: TierField,
    value: f64,
) -> AppResult<()> {
    match field {
        TierField::Soni => validation::validate_positive(value, "soni")?,
        TierField::Narxi | TierField::Summasi => {
            validation::validate_non_negative(value, match field {
                TierField::Narxi => "narxi",
                _ => "summasi",
            })?
        }
    }

    if field == TierField::Soni
        && tiers.iter().any(|t| t.id != tier_id && t.soni == value)
    {
        return Err(AppError::Conflict(format!(
            "A tier with breakpoint {} already exists",
            value
        )));
    }

    let tier = tiers
        .iter_mut()
        .find(|t| t.id == tier_id)
        .ok_or_else(|| AppError::NotFound("Price tier not found".to_string()))?;

    match field {
        TierField::Soni => {
            tier.soni = value;
            tier.summasi = recompute_summasi(tier);
        }
        TierField::Narxi => {
            tier.narxi = value;
            tier.summasi = recompute_summasi(tier);
        }
        TierField::Summasi => {
            tier.summasi = value;
            tier.narxi = recompute_narxi(tier);
        }
    }

    if field == TierField::Soni {
        sort_tiers(tiers);
    }
    Ok(())
}

/// Set a tier's note text
pub fn update_tier_note(
    tiers: &mut [PriceTier],
    tier_id: &str,
    note: Option<String>,
) -> AppResult<()> {
    if let Some(text) = &note {
        validation::validate_note(text, "izoh")?;
    }
    let tier = tiers
        .iter_mut()
        .find(|t| t.id == tier_id)
        .ok_or_else(|| AppError::NotFound("Price tier not found".to_string()))?;
    tier.izoh = note.filter(|n| !n.trim().is_empty());
    Ok(())
}

/// Remove a tier by id
pub fn remove_tier(tiers: &mut Vec<PriceTier>, tier_id: &str) -> AppResult<()> {
    let before = tiers.len();
    tiers.retain(|t| t.id != tier_id);
    if tiers.len() == before {
        return Err(AppError::NotFound("Price tier not found".to_string()));
    }
    Ok(())
}

/// Attach a flat surcharge to a tier and fold it into summasi
pub fn add_service(
    tiers: &mut [PriceTier],
    tier_id: &str,
    name: &str,
    cost: f64,
) -> AppResult<String> {
    validation::validate_name(name, "service name")?;
    validation::validate_non_negative(cost, "service cost")?;

    let tier = tiers
        .iter_mut()
        .find(|t| t.id == tier_id)
        .ok_or_else(|| AppError::NotFound("Price tier not found".to_string()))?;

    let service = AdditionalService {
        id: Uuid::new_v4().to_string(),
        name: name.trim().to_string(),
        cost,
    };
    let id = service.id.clone();
    tier.additional_services
        .get_or_insert_with(Vec::new)
        .push(service);
    tier.summasi = recompute_summasi(tier);
    Ok(id)
}

/// Detach a surcharge from a tier and recompute summasi
pub fn remove_service(tiers: &mut [PriceTier], tier_id: &str, service_id: &str) -> AppResult<()> {
    let tier = tiers
        .iter_mut()
        .find(|t| t.id == tier_id)
        .ok_or_else(|| AppError::NotFound("Price tier not found".to_string()))?;

    let services = tier
        .additional_services
        .as_mut()
        .ok_or_else(|| AppError::NotFound("Additional service not found".to_string()))?;
    let before = services.len();
    services.retain(|s| s.id != service_id);
    if services.len() == before {
        return Err(AppError::NotFound(
            "Additional service not found".to_string(),
        ));
    }
    if services.is_empty() {
        tier.additional_services = None;
    }
    tier.summasi = recompute_summasi(tier);
    Ok(())
}

/// Sort tiers ascending by breakpoint
pub fn sort_tiers(tiers: &mut [PriceTier]) {
    tiers.sort_by(|a, b| a.soni.partial_cmp(&b.soni).unwrap_or(std::cmp::Ordering::Equal));
}

/// Breakpoint values that appear more than once in a tier list.
///
/// Duplicates can arrive through imports; resolution still picks the first
/// match, but callers surface a warning so the operator can fix the table.
pub fn duplicate_breakpoints(tiers: &[PriceTier]) -> Vec<f64> {
    let mut seen = Vec::new();
    let mut duplicates = Vec::new();
    for tier in tiers {
        if seen.contains(&tier.soni) {
            if !duplicates.contains(&tier.soni) {
                duplicates.push(tier.soni);
            }
        } else {
            seen.push(tier.soni);
        }
    }
    duplicates
}

/// Copy a variant's tier list under a new key, with fresh tier and service ids
pub fn copy_variant(
    variants: &mut PriceVariants,
    source_key: &str,
    target_key: &str,
) -> AppResult<()> {
    if source_key == target_key {
        return Err(AppError::Validation(
            "Source and target keys are identical".to_string(),
        ));
    }
    let source = variants
        .get(source_key)
        .ok_or_else(|| AppError::NotFound("Source price variant not found".to_string()))?;
    if variants.contains_key(target_key) {
        return Err(AppError::Conflict(
            "Target price variant already exists".to_string(),
        ));
    }

    let copied = source
        .iter()
        .map(|tier| PriceTier {
            id: Uuid::new_v4().to_string(),
            additional_services: tier.additional_services.as_ref().map(|services| {
                services
                    .iter()
                    .map(|s| AdditionalService {
                        id: Uuid::new_v4().to_string(),
                        name: s.name.clone(),
                        cost: s.cost,
                    })
                    .collect()
            }),
            ..tier.clone()
        })
        .collect();

    variants.insert(target_key.to_string(), copied);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_add_tier_keeps_sorted() {
        let mut tiers = vec![tier(100.0, 1000.0), tier(500.0, 800.0)];
        add_tier(&mut tiers, 300.0, 900.0).unwrap();
        let breakpoints: Vec<f64> = tiers.iter().map(|t| t.soni).collect();
        assert_eq!(breakpoints, vec![100.0, 300.0, 500.0]);
    }

    #[test]
    fn test_add_tier_rejects_duplicate_breakpoint() {
        let mut tiers = vec![tier(100.0, 1000.0)];
        let err = add_tier(&mut tiers, 100.0, 900.0).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_add_tier_computes_summasi() {
        let mut tiers = Vec::new();
        add_tier(&mut tiers, 1000.0, 700.0).unwrap();
        assert_eq!(tiers[0].summasi, 700_000.0);
    }

    #[test]
    fn test_update_narxi_recomputes_summasi() {
        let mut tiers = vec![tier(100.0, 1000.0)];
        let id = tiers[0].id.clone();
        update_tier_field(&mut tiers, &id, TierField::Narxi, 1200.0).unwrap();
        assert_eq!(tiers[0].summasi, 120_000.0);
    }

    #[test]
    fn test_update_summasi_back_solves_narxi() {
        let mut tiers = vec![tier(100.0, 1000.0)];
        let id = tiers[0].id.clone();
        update_tier_field(&mut tiers, &id, TierField::Summasi, 150_000.0).unwrap();
        assert_eq!(tiers[0].narxi, 1500.0);
        assert_eq!(tiers[0].summasi, 150_000.0);
    }

    #[test]
    fn test_update_summasi_excludes_services_from_narxi() {
        let mut tiers = vec![tier(100.0, 1000.0)];
        let id = tiers[0].id.clone();
        add_service(&mut tiers, &id, "Uglarini yumaloqlash", 5000.0).unwrap();
        assert_eq!(tiers[0].summasi, 105_000.0);

        update_tier_field(&mut tiers, &id, TierField::Summasi, 155_000.0).unwrap();
        // (155000 - 5000) / 100
        assert_eq!(tiers[0].narxi, 1500.0);
    }

    #[test]
    fn test_update_soni_resorts() {
        let mut tiers = vec![tier(100.0, 1000.0), tier(500.0, 800.0)];
        let id = tiers[0].id.clone();
        update_tier_field(&mut tiers, &id, TierField::Soni, 900.0).unwrap();
        assert_eq!(tiers[0].soni, 500.0);
        assert_eq!(tiers[1].soni, 900.0);
        assert_eq!(tiers[1].summasi, 900_000.0);
    }

    #[test]
    fn test_service_lifecycle() {
        let mut tiers = vec![tier(100.0, 1000.0)];
        let tier_id = tiers[0].id.clone();
        let service_id = add_service(&mut tiers, &tier_id, "Perforatsiya", 3000.0).unwrap();
        assert_eq!(tiers[0].summasi, 103_000.0);

        remove_service(&mut tiers, &tier_id, &service_id).unwrap();
        assert!(tiers[0].additional_services.is_none());
        assert_eq!(tiers[0].summasi, 100_000.0);
    }

    #[test]
    fn test_remove_tier() {
        let mut tiers = vec![tier(100.0, 1000.0), tier(500.0, 800.0)];
        let id = tiers[0].id.clone();
        remove_tier(&mut tiers, &id).unwrap();
        assert_eq!(tiers.len(), 1);
        assert!(matches!(
            remove_tier(&mut tiers, "missing"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_breakpoints() {
        let tiers = vec![tier(100.0, 1000.0), tier(100.0, 900.0), tier(500.0, 800.0)];
        assert_eq!(duplicate_breakpoints(&tiers), vec![100.0]);
        assert!(duplicate_breakpoints(&tiers[2..]).is_empty());
    }

    #[test]
    fn test_copy_variant_fresh_ids() {
        let mut variants = PriceVariants::new();
        let mut source_tiers = vec![tier(100.0, 1000.0)];
        let tier_id = source_tiers[0].id.clone();
        add_service(&mut source_tiers, &tier_id, "Lak", 2000.0).unwrap();
        variants.insert("vizitka".to_string(), source_tiers);

        copy_variant(&mut variants, "vizitka", "vizitka:lamination=matte").unwrap();

        let source = &variants["vizitka"][0];
        let copied = &variants["vizitka:lamination=matte"][0];
        assert_ne!(source.id, copied.id);
        assert_eq!(source.soni, copied.soni);
        assert_eq!(source.summasi, copied.summasi);
        let src_svc = &source.additional_services.as_ref().unwrap()[0];
        let cp_svc = &copied.additional_services.as_ref().unwrap()[0];
        assert_ne!(src_svc.id, cp_svc.id);
        assert_eq!(src_svc.cost, cp_svc.cost);
    }

    #[test]
    fn test_copy_variant_conflicts() {
        let mut variants = PriceVariants::new();
        variants.insert("vizitka".to_string(), vec![tier(100.0, 1000.0)]);
        assert!(matches!(
            copy_variant(&mut variants, "vizitka", "vizitka"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            copy_variant(&mut variants, "missing", "target"),
            Err(AppError::NotFound(_))
        ));
        variants.insert("taken".to_string(), Vec::new());
        assert!(matches!(
            copy_variant(&mut variants, "vizitka", "taken"),
            Err(AppError::Conflict(_))
        ));
    }
}
