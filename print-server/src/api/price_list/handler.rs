//! Price List API Handlers
//!
//! Everything here operates on the calling user's own table; there is no
//! cross-user access. Replacements follow last-writer-wins.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{PriceList, PriceListUpdate, PriceTier, PriceVariants};
use tracing::warn;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::pricing;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

/// Validate an incoming variants map before accepting it wholesale.
///
/// All-or-nothing: one bad tier rejects the entire payload.
fn validate_variants(variants: &PriceVariants) -> AppResult<()> {
    for (key, tiers) in variants {
        if key.trim().is_empty() {
            return Err(AppError::Validation("Empty variant key".to_string()));
        }
        for tier in tiers {
            validation::validate_positive(tier.soni, "soni")?;
            validation::validate_non_negative(tier.narxi, "narxi")?;
            validation::validate_non_negative(tier.summasi, "summasi")?;
            if let Some(izoh) = &tier.izoh {
                validation::validate_note(izoh, "izoh")?;
            }
            if let Some(services) = &tier.additional_services {
                for service in services {
                    validation::validate_name(&service.name, "service name")?;
                    validation::validate_non_negative(service.cost, "service cost")?;
                }
            }
        }
        let duplicates = pricing::duplicate_breakpoints(tiers);
        if !duplicates.is_empty() {
            warn!(
                target: "pricing",
                key = %key,
                ?duplicates,
                "price table accepted with duplicate breakpoints"
            );
        }
    }
    Ok(())
}

/// Sort every variant's tiers ascending before storing
fn normalize(variants: &mut PriceVariants) {
    for tiers in variants.values_mut() {
        pricing::sort_tiers(tiers);
    }
}

/// GET /api/price-list
pub async fn get(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<PriceList>>> {
    Ok(ok(state.store.price_list(&current.phone)))
}

/// PUT /api/price-list - wholesale replacement
pub async fn put(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<PriceListUpdate>,
) -> AppResult<Json<AppResponse<PriceList>>> {
    validate_variants(&payload.variants)?;
    let mut variants = payload.variants;
    normalize(&mut variants);
    let saved = state.store.put_price_list(
        &current.phone,
        PriceList {
            variants,
            last_updated: None,
        },
    )?;
    Ok(ok(saved))
}

/// GET /api/price-list/export - same shape as GET, intended for backup
/// files
pub async fn export(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<PriceList>> {
    Ok(Json(state.store.price_list(&current.phone)))
}

/// POST /api/price-list/import - restore from a backup file.
///
/// The payload type requires the `variants` key, so a truncated or
/// unrelated JSON file is rejected before it can wipe the stored table.
pub async fn import(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<PriceListUpdate>,
) -> AppResult<Json<AppResponse<PriceList>>> {
    validate_variants(&payload.variants)?;
    let mut variants = payload.variants;
    normalize(&mut variants);
    let saved = state.store.put_price_list(
        &current.phone,
        PriceList {
            variants,
            last_updated: None,
        },
    )?;
    state
        .store
        .audit(state.actor(&current), "Narxlar jadvali import qilindi".to_string());
    Ok(ok(saved))
}

#[derive(Deserialize)]
pub struct AdjustRequest {
    pub percent: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustResponse {
    pub adjusted_tiers: usize,
    pub price_list: PriceList,
}

/// POST /api/price-list/adjust - bulk percentage adjustment across every
/// variant
pub async fn adjust(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<AdjustRequest>,
) -> AppResult<Json<AppResponse<AdjustResponse>>> {
    let adjusted = state.store.update_price_list(&current.phone, |list| {
        pricing::apply_percentage(&mut list.variants, payload.percent)
    })?;
    state.store.audit(
        state.actor(&current),
        format!("Narxlar {}% ga o'zgartirildi", payload.percent),
    );
    Ok(ok(AdjustResponse {
        adjusted_tiers: adjusted,
        price_list: state.store.price_list(&current.phone),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyVariantRequest {
    pub source_key: String,
    pub target_key: String,
}

/// POST /api/price-list/copy-variant
pub async fn copy_variant(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<CopyVariantRequest>,
) -> AppResult<Json<AppResponse<PriceList>>> {
    state.store.update_price_list(&current.phone, |list| {
        pricing::copy_variant(&mut list.variants, &payload.source_key, &payload.target_key)
    })?;
    Ok(ok(state.store.price_list(&current.phone)))
}

/// DELETE /api/price-list/variants/{key}
pub async fn delete_variant(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(key): Path<String>,
) -> AppResult<Json<AppResponse<PriceList>>> {
    state.store.update_price_list(&current.phone, |list| {
        list.variants
            .remove(&key)
            .ok_or_else(|| AppError::NotFound("Price variant not found".to_string()))?;
        Ok(())
    })?;
    Ok(ok(state.store.price_list(&current.phone)))
}

#[derive(Deserialize)]
pub struct AddTierRequest {
    pub soni: f64,
    pub narxi: f64,
}

/// POST /api/price-list/variants/{key}/tiers
///
/// Creates the variant when it does not exist yet.
pub async fn add_tier(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(key): Path<String>,
    Json(payload): Json<AddTierRequest>,
) -> AppResult<Json<AppResponse<PriceTier>>> {
    let tier_id = state.store.update_price_list(&current.phone, |list| {
        let tiers = list.variants.entry(key.clone()).or_default();
        pricing::add_tier(tiers, payload.soni, payload.narxi)
    })?;

    let list = state.store.price_list(&current.phone);
    let tier = list
        .variants
        .get(&key)
        .and_then(|tiers| tiers.iter().find(|t| t.id == tier_id))
        .cloned()
        .ok_or_else(|| AppError::Internal("Tier vanished after insert".to_string()))?;
    Ok(ok(tier))
}

/// Tier field edit payload: exactly one numeric field, or a note change
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTierRequest {
    pub soni: Option<f64>,
    pub narxi: Option<f64>,
    pub summasi: Option<f64>,
    /// Double option: absent = untouched, null = cleared
    #[serde(default, with = "double_option")]
    pub izoh: Option<Option<String>>,
}

mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(de).map(Some)
    }
}

/// PUT /api/price-list/variants/{key}/tiers/{tier_id}
pub async fn update_tier(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path((key, tier_id)): Path<(String, String)>,
    Json(payload): Json<UpdateTierRequest>,
) -> AppResult<Json<AppResponse<PriceList>>> {
    let edits = [
        payload.soni.map(|v| (pricing::TierField::Soni, v)),
        payload.narxi.map(|v| (pricing::TierField::Narxi, v)),
        payload.summasi.map(|v| (pricing::TierField::Summasi, v)),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();

    if edits.len() > 1 {
        return Err(AppError::Validation(
            "Edit one of soni, narxi or summasi at a time".to_string(),
        ));
    }
    if edits.is_empty() && payload.izoh.is_none() {
        return Err(AppError::Validation("Nothing to update".to_string()));
    }

    state.store.update_price_list(&current.phone, |list| {
        let tiers = list
            .variants
            .get_mut(&key)
            .ok_or_else(|| AppError::NotFound("Price variant not found".to_string()))?;
        if let Some((field, value)) = edits.into_iter().next() {
            pricing::update_tier_field(tiers, &tier_id, field, value)?;
        }
        if let Some(izoh) = payload.izoh {
            pricing::update_tier_note(tiers, &tier_id, izoh)?;
        }
        Ok(())
    })?;
    Ok(ok(state.store.price_list(&current.phone)))
}

/// DELETE /api/price-list/variants/{key}/tiers/{tier_id}
pub async fn delete_tier(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path((key, tier_id)): Path<(String, String)>,
) -> AppResult<Json<AppResponse<PriceList>>> {
    state.store.update_price_list(&current.phone, |list| {
        let tiers = list
            .variants
            .get_mut(&key)
            .ok_or_else(|| AppError::NotFound("Price variant not found".to_string()))?;
        pricing::remove_tier(tiers, &tier_id)?;
        // Empty variants disappear rather than lingering as blank sections
        if tiers.is_empty() {
            list.variants.remove(&key);
        }
        Ok(())
    })?;
    Ok(ok(state.store.price_list(&current.phone)))
}

#[derive(Deserialize)]
pub struct AddServiceRequest {
    pub name: String,
    pub cost: f64,
}

/// POST /api/price-list/variants/{key}/tiers/{tier_id}/services
pub async fn add_service(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path((key, tier_id)): Path<(String, String)>,
    Json(payload): Json<AddServiceRequest>,
) -> AppResult<Json<AppResponse<PriceList>>> {
    state.store.update_price_list(&current.phone, |list| {
        let tiers = list
            .variants
            .get_mut(&key)
            .ok_or_else(|| AppError::NotFound("Price variant not found".to_string()))?;
        pricing::add_service(tiers, &tier_id, &payload.name, payload.cost)?;
        Ok(())
    })?;
    Ok(ok(state.store.price_list(&current.phone)))
}

/// DELETE /api/price-list/variants/{key}/tiers/{tier_id}/services/{service_id}
pub async fn delete_service(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path((key, tier_id, service_id)): Path<(String, String, String)>,
) -> AppResult<Json<AppResponse<PriceList>>> {
    state.store.update_price_list(&current.phone, |list| {
        let tiers = list
            .variants
            .get_mut(&key)
            .ok_or_else(|| AppError::NotFound("Price variant not found".to_string()))?;
        pricing::remove_service(tiers, &tier_id, &service_id)?;
        Ok(())
    })?;
    Ok(ok(state.store.price_list(&current.phone)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(soni: f64, narxi: f64, summasi: f64) -> PriceTier {
        PriceTier {
            id: uuid::Uuid::new_v4().to_string(),
            soni,
            narxi,
            summasi,
            additional_services: None,
            izoh: None,
        }
    }

    #[test]
    fn test_validate_variants_rejects_bad_tier() {
        let mut variants = PriceVariants::new();
        variants.insert(
            "vizitka".to_string(),
            vec![tier(100.0, 1000.0, 100_000.0), tier(-5.0, 800.0, 400_000.0)],
        );
        assert!(matches!(
            validate_variants(&variants),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_variants_rejects_empty_key() {
        let mut variants = PriceVariants::new();
        variants.insert("  ".to_string(), vec![tier(100.0, 1000.0, 100_000.0)]);
        assert!(validate_variants(&variants).is_err());
    }

    #[test]
    fn test_validate_variants_accepts_duplicate_breakpoints_on_import() {
        // Backups must round-trip even when a past edit left duplicates
        let mut variants = PriceVariants::new();
        variants.insert(
            "vizitka".to_string(),
            vec![tier(100.0, 1000.0, 100_000.0), tier(100.0, 900.0, 90_000.0)],
        );
        assert!(validate_variants(&variants).is_ok());
    }

    #[test]
    fn test_import_payload_requires_variants_key() {
        // A backup missing `variants` must fail to parse, not silently
        // become an empty table that replaces the stored one
        assert!(serde_json::from_str::<PriceListUpdate>(r#"{"foo": 1}"#).is_err());
        assert!(serde_json::from_str::<PriceListUpdate>("{}").is_err());

        let parsed =
            serde_json::from_str::<PriceListUpdate>(r#"{"variants": {}}"#).unwrap();
        assert!(parsed.variants.is_empty());
    }

    #[test]
    fn test_normalize_sorts_tiers() {
        let mut variants = PriceVariants::new();
        variants.insert(
            "vizitka".to_string(),
            vec![tier(500.0, 800.0, 400_000.0), tier(100.0, 1000.0, 100_000.0)],
        );
        normalize(&mut variants);
        let tiers = &variants["vizitka"];
        assert!(tiers[0].soni < tiers[1].soni);
    }
}
