//! Health Handlers

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppResponse, ok};

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    environment: String,
    version: &'static str,
}

/// GET /health
pub async fn health(State(state): State<ServerState>) -> Json<AppResponse<Health>> {
    ok(Health {
        status: "ok",
        environment: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
