//! Tariff Plan API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{TariffPlan, TariffPlanCreate, TariffPlanUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

/// GET /api/tariff-plans
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<TariffPlan>>>> {
    Ok(ok(state.store.tariff_plans.read().clone()))
}

/// POST /api/admin/tariffplans
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<TariffPlanCreate>,
) -> AppResult<Json<AppResponse<TariffPlan>>> {
    current.require_admin()?;
    validation::validate_name(&payload.id, "id")?;
    validation::validate_name(&payload.name, "name")?;
    validation::validate_non_negative(payload.price, "price")?;

    let plan = TariffPlan {
        id: payload.id.trim().to_string(),
        name: payload.name.trim().to_string(),
        price: payload.price,
        period: payload.period.unwrap_or_default(),
        features: payload.features.unwrap_or_default(),
    };
    {
        let mut plans = state.store.tariff_plans.write();
        if plans.iter().any(|p| p.id == plan.id) {
            return Err(AppError::Conflict(format!(
                "Tariff plan {} already exists",
                plan.id
            )));
        }
        plans.push(plan.clone());
    }
    state.store.persist_tariff_plans()?;
    state
        .store
        .audit(state.actor(&current), format!("Tarif rejasi yaratildi: {}", plan.id));
    Ok(ok(plan))
}

/// PUT /api/admin/tariffplans/{id}
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<TariffPlanUpdate>,
) -> AppResult<Json<AppResponse<TariffPlan>>> {
    current.require_admin()?;
    let updated = {
        let mut plans = state.store.tariff_plans.write();
        let plan = plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Tariff plan {} not found", id)))?;
        if let Some(name) = payload.name {
            validation::validate_name(&name, "name")?;
            plan.name = name.trim().to_string();
        }
        if let Some(price) = payload.price {
            validation::validate_non_negative(price, "price")?;
            plan.price = price;
        }
        if let Some(period) = payload.period {
            plan.period = period;
        }
        if let Some(features) = payload.features {
            plan.features = features;
        }
        plan.clone()
    };
    state.store.persist_tariff_plans()?;
    state
        .store
        .audit(state.actor(&current), format!("Tarif rejasi yangilandi: {}", id));
    Ok(ok(updated))
}

/// DELETE /api/admin/tariffplans/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    current.require_admin()?;
    {
        let mut plans = state.store.tariff_plans.write();
        let before = plans.len();
        plans.retain(|p| p.id != id);
        if plans.len() == before {
            return Err(AppError::NotFound(format!("Tariff plan {} not found", id)));
        }
    }
    state.store.persist_tariff_plans()?;
    state
        .store
        .audit(state.actor(&current), format!("Tarif rejasi o'chirildi: {}", id));
    Ok(ok(()))
}
