//! User administration API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/users", get(handler::list))
        .route("/api/admin/users/{phone}", put(handler::update))
}
