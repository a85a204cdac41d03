//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/orders", user_routes())
        .nest("/api/admin/orders", admin_routes())
}

fn user_routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list_mine).post(handler::create))
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_all))
        .route("/{id}/status", put(handler::update_status))
}
