//! Template API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/templates", public_routes())
        .nest("/api/admin/templates", admin_routes())
}

fn public_routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list))
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
