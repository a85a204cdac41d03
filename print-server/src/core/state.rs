use std::path::Path;
use std::sync::Arc;

use shared::models::{User, UserRole, UserStatus};
use tracing::{info, warn};

use crate::auth::{JwtService, hash_password};
use crate::core::{Config, Result, ServerError};
use crate::llm::LlmClient;
use crate::store::{DataStore, UserRecord};

/// Shared application state, cloned into every handler
///
/// | Field | Description |
/// |-------|-------------|
/// | config | Immutable configuration |
/// | store | Persistent data store |
/// | llm | Model service client |
/// | jwt | Token service |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<DataStore>,
    pub llm: Arc<LlmClient>,
    pub jwt: Arc<JwtService>,
}

impl ServerState {
    /// Open the store, construct services and seed the admin account
    pub fn initialize(config: &Config) -> Result<Self> {
        let store = DataStore::open(Path::new(&config.work_dir))
            .map_err(|e| ServerError::Storage(e.to_string()))?;

        let state = Self {
            config: config.clone(),
            store: Arc::new(store),
            llm: Arc::new(LlmClient::new(config)),
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
        };

        state.seed_admin()?;
        Ok(state)
    }

    /// Acting user for the audit trail, resolved from the store so the
    /// entry reflects current status rather than token claims
    pub fn actor(&self, current: &crate::auth::CurrentUser) -> Option<User> {
        self.store.find_user(&current.phone).map(|r| r.user)
    }

    /// Create the admin account from ADMIN_PHONE / ADMIN_PASSWORD if it
    /// does not exist yet. An existing account is never overwritten.
    fn seed_admin(&self) -> Result<()> {
        let (Some(phone), Some(password)) =
            (&self.config.admin_phone, &self.config.admin_password)
        else {
            if self.config.is_production() {
                warn!("ADMIN_PHONE / ADMIN_PASSWORD not set, no admin account seeded");
            }
            return Ok(());
        };

        if self.store.find_user(phone).is_some() {
            return Ok(());
        }

        let password_hash =
            hash_password(password).map_err(|e| ServerError::Config(e.to_string()))?;
        self.store
            .insert_user(UserRecord {
                user: User {
                    phone: phone.clone(),
                    name: "Administrator".to_string(),
                    status: UserStatus::Active,
                    role: UserRole::Admin,
                },
                password_hash,
            })
            .map_err(|e| ServerError::Storage(e.to_string()))?;

        info!(phone = %phone, "admin account seeded");
        Ok(())
    }
}
