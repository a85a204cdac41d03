//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

/// GET /api/products - full catalog
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    Ok(ok(state.store.products.read().clone()))
}

/// POST /api/admin/products
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<AppResponse<Product>>> {
    current.require_admin()?;
    validation::validate_name(&payload.id, "id")?;
    validation::validate_name(&payload.name, "name")?;

    let product = Product {
        id: payload.id.trim().to_string(),
        name: payload.name.trim().to_string(),
        description: payload.description.unwrap_or_default(),
        icon: payload.icon.unwrap_or_else(|| "Printer".to_string()),
        fields: payload.fields,
        pricing_dimension: payload.pricing_dimension.unwrap_or_default(),
        pricing_attributes: payload.pricing_attributes.unwrap_or_default(),
        default_state: payload.default_state,
    };

    {
        let mut products = state.store.products.write();
        if products.iter().any(|p| p.id == product.id) {
            return Err(AppError::Conflict(format!(
                "Product {} already exists",
                product.id
            )));
        }
        products.push(product.clone());
    }
    state.store.persist_products()?;
    state
        .store
        .audit(state.actor(&current), format!("Mahsulot yaratildi: {}", product.id));
    Ok(ok(product))
}

/// PUT /api/admin/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<Product>>> {
    current.require_admin()?;
    if let Some(name) = &payload.name {
        validation::validate_name(name, "name")?;
    }

    let updated = {
        let mut products = state.store.products.write();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;
        if let Some(name) = payload.name {
            product.name = name.trim().to_string();
        }
        if let Some(description) = payload.description {
            product.description = description;
        }
        if let Some(icon) = payload.icon {
            product.icon = icon;
        }
        if let Some(fields) = payload.fields {
            product.fields = fields;
        }
        if let Some(dimension) = payload.pricing_dimension {
            product.pricing_dimension = dimension;
        }
        if let Some(attributes) = payload.pricing_attributes {
            product.pricing_attributes = attributes;
        }
        if let Some(default_state) = payload.default_state {
            product.default_state = Some(default_state);
        }
        product.clone()
    };
    state.store.persist_products()?;
    state
        .store
        .audit(state.actor(&current), format!("Mahsulot yangilandi: {}", id));
    Ok(ok(updated))
}

/// DELETE /api/admin/products/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    current.require_admin()?;
    {
        let mut products = state.store.products.write();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }
    }
    state.store.persist_products()?;
    state
        .store
        .audit(state.actor(&current), format!("Mahsulot o'chirildi: {}", id));
    Ok(ok(()))
}
