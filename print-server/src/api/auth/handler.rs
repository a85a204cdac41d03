//! Auth API Handlers

use axum::{Json, extract::State};
use shared::models::{
    LoginPayload, LoginResponse, ProfileUpdate, RegisterPayload, User, UserStatus,
};
use tracing::info;

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::store::UserRecord;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

/// POST /api/auth/register - create an account and log it in
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterPayload>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    validation::validate_name(&payload.name, "name")?;
    validation::validate_phone(&payload.phone)?;
    validation::validate_password(&payload.password)?;

    let user = User {
        phone: payload.phone.trim().to_string(),
        name: payload.name.trim().to_string(),
        ..User::default()
    };
    let password_hash = hash_password(&payload.password)?;
    state.store.insert_user(UserRecord {
        user: user.clone(),
        password_hash,
    })?;

    info!(target: "auth", phone = %user.phone, "user registered");

    let access = state
        .jwt
        .generate_token(&user)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(ok(LoginResponse { access, user }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let record = state
        .store
        .find_user(payload.phone.trim())
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &record.password_hash) {
        return Err(AppError::invalid_credentials());
    }
    if record.user.status == UserStatus::Blocked {
        return Err(AppError::Forbidden("Account is blocked".to_string()));
    }

    let access = state
        .jwt
        .generate_token(&record.user)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(ok(LoginResponse {
        access,
        user: record.user,
    }))
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<User>>> {
    let record = state
        .store
        .find_user(&current.phone)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(ok(record.user))
}

/// PUT /api/auth/profile - self-service name/password change
pub async fn update_profile(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<AppResponse<User>>> {
    if let Some(name) = &payload.name {
        validation::validate_name(name, "name")?;
    }
    let password_hash = match &payload.password {
        Some(password) => {
            validation::validate_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    let user = state.store.update_user(&current.phone, |record| {
        if let Some(name) = payload.name {
            record.user.name = name.trim().to_string();
        }
        if let Some(hash) = password_hash {
            record.password_hash = hash;
        }
    })?;
    Ok(ok(user))
}
