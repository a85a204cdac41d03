//! Audit Log Model

use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// One admin action, appended to the audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: u64,
    pub timestamp: String,
    /// Acting user, None for system-initiated actions
    #[serde(default)]
    pub user: Option<User>,
    pub action: String,
}
