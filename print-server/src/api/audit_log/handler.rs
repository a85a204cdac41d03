//! Audit Log Handlers

use axum::{Json, extract::State};
use shared::models::AuditLogEntry;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/admin/audit-log - newest entries first
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<AuditLogEntry>>>> {
    current.require_admin()?;
    let mut entries = state.store.audit_log.read().clone();
    entries.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(ok(entries))
}
