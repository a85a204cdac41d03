//! User Administration Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{User, UserStatus, UserUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

/// GET /api/admin/users - public views only, password hashes never leave
/// the store
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<User>>>> {
    current.require_admin()?;
    let users = state
        .store
        .users
        .read()
        .iter()
        .map(|r| r.user.clone())
        .collect();
    Ok(ok(users))
}

/// PUT /api/admin/users/{phone}
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(phone): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<AppResponse<User>>> {
    current.require_admin()?;
    if let Some(name) = &payload.name {
        validation::validate_name(name, "name")?;
    }
    // An admin cannot lock themselves out
    if phone == current.phone && payload.status == Some(UserStatus::Blocked) {
        return Err(AppError::Validation(
            "Cannot block your own account".to_string(),
        ));
    }
    let updated = state.store.update_user(&phone, |record| {
        if let Some(name) = payload.name {
            record.user.name = name;
        }
        if let Some(status) = payload.status {
            record.user.status = status;
        }
    })?;
    state.store.audit(
        state.actor(&current),
        format!("Foydalanuvchi yangilandi: {}", phone),
    );
    Ok(ok(updated))
}
