//! Price List API module
//!
//! Per-user price tables: wholesale read/replace, import/export, tier and
//! service operations, variant duplication and bulk adjustment.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/price-list", price_list_routes())
}

fn price_list_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get).put(handler::put))
        .route("/export", get(handler::export))
        .route("/import", post(handler::import))
        .route("/adjust", post(handler::adjust))
        .route("/copy-variant", post(handler::copy_variant))
        .route("/variants/{key}", delete(handler::delete_variant))
        .route("/variants/{key}/tiers", post(handler::add_tier))
        .route(
            "/variants/{key}/tiers/{tier_id}",
            put(handler::update_tier).delete(handler::delete_tier),
        )
        .route(
            "/variants/{key}/tiers/{tier_id}/services",
            post(handler::add_service),
        )
        .route(
            "/variants/{key}/tiers/{tier_id}/services/{service_id}",
            delete(handler::delete_service),
        )
}
