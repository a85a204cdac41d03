//! Subscription API Handlers
//!
//! Subscriptions snapshot the user and plan at creation time, so later
//! plan edits do not rewrite existing contracts.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Subscription, SubscriptionCreate, SubscriptionStatus, SubscriptionUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/my-subscriptions
pub async fn list_mine(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Subscription>>>> {
    let subscriptions = state
        .store
        .subscriptions
        .read()
        .iter()
        .filter(|s| s.user.phone == current.phone)
        .cloned()
        .collect();
    Ok(ok(subscriptions))
}

/// GET /api/admin/subscriptions
pub async fn list_all(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Subscription>>>> {
    current.require_admin()?;
    Ok(ok(state.store.subscriptions.read().clone()))
}

/// POST /api/admin/subscriptions
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<SubscriptionCreate>,
) -> AppResult<Json<AppResponse<Subscription>>> {
    current.require_admin()?;

    let user = state
        .store
        .find_user(&payload.user)
        .map(|r| r.user)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", payload.user)))?;
    let plan = state
        .store
        .tariff_plans
        .read()
        .iter()
        .find(|p| p.id == payload.plan)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Tariff plan {} not found", payload.plan)))?;

    let subscription = Subscription {
        id: state.store.next_subscription_id(),
        user,
        plan,
        status: payload.status.unwrap_or(SubscriptionStatus::Active),
        expires_at: payload.expires_at,
    };
    state.store.subscriptions.write().push(subscription.clone());
    state.store.persist_subscriptions()?;
    state.store.audit(
        state.actor(&current),
        format!(
            "Obuna yaratildi: #{} ({} / {})",
            subscription.id, subscription.user.phone, subscription.plan.id
        ),
    );
    Ok(ok(subscription))
}

/// PUT /api/admin/subscriptions/{id}
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<u64>,
    Json(payload): Json<SubscriptionUpdate>,
) -> AppResult<Json<AppResponse<Subscription>>> {
    current.require_admin()?;

    let plan = match &payload.plan {
        Some(plan_id) => Some(
            state
                .store
                .tariff_plans
                .read()
                .iter()
                .find(|p| p.id == *plan_id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Tariff plan {} not found", plan_id)))?,
        ),
        None => None,
    };

    let updated = {
        let mut subscriptions = state.store.subscriptions.write();
        let subscription = subscriptions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Subscription {} not found", id)))?;
        if let Some(plan) = plan {
            subscription.plan = plan;
        }
        if let Some(status) = payload.status {
            subscription.status = status;
        }
        if let Some(expires_at) = payload.expires_at {
            subscription.expires_at = expires_at;
        }
        subscription.clone()
    };
    state.store.persist_subscriptions()?;
    state
        .store
        .audit(state.actor(&current), format!("Obuna yangilandi: #{}", id));
    Ok(ok(updated))
}

/// DELETE /api/admin/subscriptions/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<u64>,
) -> AppResult<Json<AppResponse<()>>> {
    current.require_admin()?;
    {
        let mut subscriptions = state.store.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        if subscriptions.len() == before {
            return Err(AppError::NotFound(format!("Subscription {} not found", id)));
        }
    }
    state.store.persist_subscriptions()?;
    state
        .store
        .audit(state.actor(&current), format!("Obuna o'chirildi: #{}", id));
    Ok(ok(()))
}
