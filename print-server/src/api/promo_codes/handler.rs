//! Promo Code API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{PromoCode, PromoCodeCreate, PromoCodeUpdate, PromoKind};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

/// Discount computed for a subtotal, clamped so the total never goes
/// negative
pub fn discount_for(code: &PromoCode, subtotal: f64) -> f64 {
    let raw = match code.kind {
        PromoKind::Percentage => subtotal * code.value / 100.0,
        PromoKind::Fixed => code.value,
    };
    raw.min(subtotal).max(0.0)
}

#[derive(Deserialize)]
pub struct ValidateRequest {
    pub code: String,
    #[serde(default)]
    pub subtotal: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub code: PromoCode,
    pub discount: f64,
}

/// POST /api/promo-codes/validate - check a code against a subtotal
pub async fn validate(
    State(state): State<ServerState>,
    _current: CurrentUser,
    Json(payload): Json<ValidateRequest>,
) -> AppResult<Json<AppResponse<ValidateResponse>>> {
    let codes = state.store.promo_codes.read();
    let code = codes
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(payload.code.trim()))
        .ok_or_else(|| AppError::NotFound("Promo code not found".to_string()))?;
    if !code.is_active {
        return Err(AppError::Validation("Promo code is not active".to_string()));
    }
    let discount = discount_for(code, payload.subtotal);
    Ok(ok(ValidateResponse {
        code: code.clone(),
        discount,
    }))
}

/// GET /api/admin/promocodes
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<PromoCode>>>> {
    current.require_admin()?;
    Ok(ok(state.store.promo_codes.read().clone()))
}

/// POST /api/admin/promocodes
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<PromoCodeCreate>,
) -> AppResult<Json<AppResponse<PromoCode>>> {
    current.require_admin()?;
    validation::validate_name(&payload.id, "id")?;
    validation::validate_non_negative(payload.value, "value")?;
    if payload.kind == PromoKind::Percentage && payload.value > 100.0 {
        return Err(AppError::Validation(
            "Percentage discount cannot exceed 100".to_string(),
        ));
    }

    let code = PromoCode {
        id: payload.id.trim().to_uppercase(),
        kind: payload.kind,
        value: payload.value,
        uses: 0,
        is_active: payload.is_active.unwrap_or(true),
    };
    {
        let mut codes = state.store.promo_codes.write();
        if codes.iter().any(|c| c.id == code.id) {
            return Err(AppError::Conflict(format!(
                "Promo code {} already exists",
                code.id
            )));
        }
        codes.push(code.clone());
    }
    state.store.persist_promo_codes()?;
    state
        .store
        .audit(state.actor(&current), format!("Promo-kod yaratildi: {}", code.id));
    Ok(ok(code))
}

/// PUT /api/admin/promocodes/{id}
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<PromoCodeUpdate>,
) -> AppResult<Json<AppResponse<PromoCode>>> {
    current.require_admin()?;
    let updated = {
        let mut codes = state.store.promo_codes.write();
        let code = codes
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Promo code {} not found", id)))?;
        if let Some(kind) = payload.kind {
            code.kind = kind;
        }
        if let Some(value) = payload.value {
            validation::validate_non_negative(value, "value")?;
            if code.kind == PromoKind::Percentage && value > 100.0 {
                return Err(AppError::Validation(
                    "Percentage discount cannot exceed 100".to_string(),
                ));
            }
            code.value = value;
        }
        if let Some(is_active) = payload.is_active {
            code.is_active = is_active;
        }
        code.clone()
    };
    state.store.persist_promo_codes()?;
    state
        .store
        .audit(state.actor(&current), format!("Promo-kod yangilandi: {}", id));
    Ok(ok(updated))
}

/// DELETE /api/admin/promocodes/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    current.require_admin()?;
    {
        let mut codes = state.store.promo_codes.write();
        let before = codes.len();
        codes.retain(|c| c.id != id);
        if codes.len() == before {
            return Err(AppError::NotFound(format!("Promo code {} not found", id)));
        }
    }
    state.store.persist_promo_codes()?;
    state
        .store
        .audit(state.actor(&current), format!("Promo-kod o'chirildi: {}", id));
    Ok(ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(kind: PromoKind, value: f64) -> PromoCode {
        PromoCode {
            id: "WELCOME10".to_string(),
            kind,
            value,
            uses: 0,
            is_active: true,
        }
    }

    #[test]
    fn test_percentage_discount() {
        assert_eq!(discount_for(&code(PromoKind::Percentage, 10.0), 200_000.0), 20_000.0);
    }

    #[test]
    fn test_fixed_discount_clamped_to_subtotal() {
        assert_eq!(discount_for(&code(PromoKind::Fixed, 50_000.0), 30_000.0), 30_000.0);
        assert_eq!(discount_for(&code(PromoKind::Fixed, 50_000.0), 80_000.0), 50_000.0);
    }
}
