//! Calculation API module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/calculate", post(handler::calculate))
        .route("/api/calculate/assist", post(handler::assist))
        .route("/api/chat", post(handler::chat))
}
