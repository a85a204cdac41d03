//! Material API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Material, MaterialCreate, MaterialUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

/// GET /api/materials
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Material>>>> {
    Ok(ok(state.store.materials.read().clone()))
}

/// POST /api/admin/materials
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<MaterialCreate>,
) -> AppResult<Json<AppResponse<Material>>> {
    current.require_admin()?;
    validation::validate_name(&payload.id, "id")?;
    validation::validate_name(&payload.name, "name")?;

    let material = Material {
        id: payload.id.trim().to_string(),
        name: payload.name.trim().to_string(),
    };
    {
        let mut materials = state.store.materials.write();
        if materials.iter().any(|m| m.id == material.id) {
            return Err(AppError::Conflict(format!(
                "Material {} already exists",
                material.id
            )));
        }
        materials.push(material.clone());
    }
    state.store.persist_materials()?;
    state
        .store
        .audit(state.actor(&current), format!("Material yaratildi: {}", material.id));
    Ok(ok(material))
}

/// PUT /api/admin/materials/{id}
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MaterialUpdate>,
) -> AppResult<Json<AppResponse<Material>>> {
    current.require_admin()?;
    let updated = {
        let mut materials = state.store.materials.write();
        let material = materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Material {} not found", id)))?;
        if let Some(name) = payload.name {
            validation::validate_name(&name, "name")?;
            material.name = name.trim().to_string();
        }
        material.clone()
    };
    state.store.persist_materials()?;
    state
        .store
        .audit(state.actor(&current), format!("Material yangilandi: {}", id));
    Ok(ok(updated))
}

/// DELETE /api/admin/materials/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    current.require_admin()?;
    {
        let mut materials = state.store.materials.write();
        let before = materials.len();
        materials.retain(|m| m.id != id);
        if materials.len() == before {
            return Err(AppError::NotFound(format!("Material {} not found", id)));
        }
    }
    state.store.persist_materials()?;
    state
        .store
        .audit(state.actor(&current), format!("Material o'chirildi: {}", id));
    Ok(ok(()))
}
