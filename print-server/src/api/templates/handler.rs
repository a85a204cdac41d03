//! Template API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Template, TemplateCreate, TemplateUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

/// GET /api/templates
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Template>>>> {
    Ok(ok(state.store.templates.read().clone()))
}

/// POST /api/admin/templates
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<TemplateCreate>,
) -> AppResult<Json<AppResponse<Template>>> {
    current.require_admin()?;
    validation::validate_name(&payload.id, "id")?;
    validation::validate_name(&payload.name, "name")?;

    // A template must point at an existing product
    if !state
        .store
        .products
        .read()
        .iter()
        .any(|p| p.id == payload.product_id)
    {
        return Err(AppError::Validation(format!(
            "Unknown product: {}",
            payload.product_id
        )));
    }

    let template = Template {
        id: payload.id.trim().to_string(),
        name: payload.name.trim().to_string(),
        description: payload.description.unwrap_or_default(),
        preview_color: payload.preview_color.unwrap_or_else(|| "bg-slate-200".to_string()),
        product_id: payload.product_id,
        default_state: payload.default_state,
    };
    {
        let mut templates = state.store.templates.write();
        if templates.iter().any(|t| t.id == template.id) {
            return Err(AppError::Conflict(format!(
                "Template {} already exists",
                template.id
            )));
        }
        templates.push(template.clone());
    }
    state.store.persist_templates()?;
    state
        .store
        .audit(state.actor(&current), format!("Shablon yaratildi: {}", template.id));
    Ok(ok(template))
}

/// PUT /api/admin/templates/{id}
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<TemplateUpdate>,
) -> AppResult<Json<AppResponse<Template>>> {
    current.require_admin()?;
    if let Some(product_id) = &payload.product_id {
        if !state.store.products.read().iter().any(|p| p.id == *product_id) {
            return Err(AppError::Validation(format!(
                "Unknown product: {}",
                product_id
            )));
        }
    }

    let updated = {
        let mut templates = state.store.templates.write();
        let template = templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Template {} not found", id)))?;
        if let Some(name) = payload.name {
            validation::validate_name(&name, "name")?;
            template.name = name.trim().to_string();
        }
        if let Some(description) = payload.description {
            template.description = description;
        }
        if let Some(preview_color) = payload.preview_color {
            template.preview_color = preview_color;
        }
        if let Some(product_id) = payload.product_id {
            template.product_id = product_id;
        }
        if let Some(default_state) = payload.default_state {
            template.default_state = default_state;
        }
        template.clone()
    };
    state.store.persist_templates()?;
    state
        .store
        .audit(state.actor(&current), format!("Shablon yangilandi: {}", id));
    Ok(ok(updated))
}

/// DELETE /api/admin/templates/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    current.require_admin()?;
    {
        let mut templates = state.store.templates.write();
        let before = templates.len();
        templates.retain(|t| t.id != id);
        if templates.len() == before {
            return Err(AppError::NotFound(format!("Template {} not found", id)));
        }
    }
    state.store.persist_templates()?;
    state
        .store
        .audit(state.actor(&current), format!("Shablon o'chirildi: {}", id));
    Ok(ok(()))
}
