//! Subscription API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/my-subscriptions", get(handler::list_mine))
        .nest("/api/admin/subscriptions", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_all).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
