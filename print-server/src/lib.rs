//! Print Server - quoting and ordering backend for print-shop products
//!
//! # Architecture
//!
//! - **Pricing core** (`pricing`): price-list key codec, tier operations,
//!   breakpoint resolver, LLM-facing table formatter, bulk adjustment
//! - **LLM client** (`llm`): external calculation service with untrusted
//!   output coercion
//! - **Store** (`store`): in-memory state with wholesale JSON persistence
//! - **Auth** (`auth`): JWT + Argon2 authentication
//! - **HTTP API** (`api`): RESTful resource routers
//!
//! # Module structure
//!
//! ```text
//! print-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT authentication
//! ├── pricing/       # pricing core
//! ├── llm/           # external LLM calculation service
//! ├── store/         # data storage
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod llm;
pub mod pricing;
pub mod store;
pub mod utils;

use std::path::PathBuf;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use store::DataStore;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____       _       __
   / __ \_____(_)___  / /_
  / /_/ / ___/ / __ \/ __/
 / ____/ /  / / / / / /_
/_/   /_/  /_/_/ /_/\__/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}

/// Load `.env`, ensure the work directory exists and initialize logging
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/print-server".into());
    let log_dir = PathBuf::from(&work_dir).join("logs");
    std::fs::create_dir_all(&log_dir)?;

    init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        log_dir.to_str(),
    );

    Ok(())
}
