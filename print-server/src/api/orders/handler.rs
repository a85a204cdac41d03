//! Order API Handlers
//!
//! Totals are always recomputed server-side from the snapshotted item
//! results; client-sent totals are ignored. Promo redemption counts are
//! bumped atomically with order creation.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DeliveryMethod, Order, OrderCreate, OrderStatus, OrderStatusUpdate};
use tracing::info;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

/// GET /api/orders - the calling user's orders, newest first
pub async fn list_mine(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let mut orders: Vec<Order> = state
        .store
        .orders
        .read()
        .iter()
        .filter(|o| o.user == current.phone)
        .cloned()
        .collect();
    orders.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(ok(orders))
}

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<AppResponse<Order>>> {
    if payload.items.is_empty() {
        return Err(AppError::Validation("Order has no items".to_string()));
    }
    validation::validate_name(&payload.customer.name, "customer name")?;
    validation::validate_phone(&payload.customer.phone)?;
    if payload.delivery.method == DeliveryMethod::Delivery
        && payload
            .delivery
            .address
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .is_empty()
    {
        return Err(AppError::Validation(
            "Delivery address is required".to_string(),
        ));
    }
    for service in &payload.additional_services {
        validation::validate_name(&service.name, "service name")?;
        validation::validate_non_negative(service.cost, "service cost")?;
    }

    let subtotal: f64 = payload.items.iter().map(|i| i.result.total_cost).sum();
    let services_total: f64 = payload.additional_services.iter().map(|s| s.cost).sum();

    // Promo validation and redemption happen under the same lock
    let (discount, promo_code) = match &payload.promo_code {
        Some(code_id) if !code_id.trim().is_empty() => {
            let mut codes = state.store.promo_codes.write();
            let code = codes
                .iter_mut()
                .find(|c| c.id.eq_ignore_ascii_case(code_id.trim()))
                .ok_or_else(|| AppError::NotFound("Promo code not found".to_string()))?;
            if !code.is_active {
                return Err(AppError::Validation("Promo code is not active".to_string()));
            }
            let discount = crate::api::promo_codes::discount_for(code, subtotal);
            code.uses += 1;
            (discount, Some(code.id.clone()))
        }
        _ => (0.0, None),
    };
    if promo_code.is_some() {
        state.store.persist_promo_codes()?;
    }

    let order = Order {
        id: state.store.next_order_id(),
        user: current.phone.clone(),
        items: payload.items,
        created_at: chrono::Utc::now().to_rfc3339(),
        status: OrderStatus::Accepted,
        subtotal,
        promo_code,
        discount,
        additional_services: payload.additional_services,
        total_cost: (subtotal - discount + services_total).max(0.0),
        customer: payload.customer,
        delivery: payload.delivery,
        payment_method: payload.payment_method,
    };

    state.store.orders.write().push(order.clone());
    state.store.persist_orders()?;
    info!(target: "orders", id = order.id, total = order.total_cost, "order created");
    Ok(ok(order))
}

/// GET /api/admin/orders - every order, newest first
pub async fn list_all(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    current.require_admin()?;
    let mut orders = state.store.orders.read().clone();
    orders.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(ok(orders))
}

/// PUT /api/admin/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<u64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<AppResponse<Order>>> {
    current.require_admin()?;
    let updated = {
        let mut orders = state.store.orders.write();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;
        // Terminal states stay terminal
        if matches!(order.status, OrderStatus::Delivered | OrderStatus::Cancelled) {
            return Err(AppError::Validation(format!(
                "Order {} is already finalized",
                id
            )));
        }
        order.status = payload.status;
        order.clone()
    };
    state.store.persist_orders()?;
    state.store.audit(
        state.actor(&current),
        format!("Buyurtma #{} holati: {:?}", id, updated.status),
    );
    Ok(ok(updated))
}
