//! Shared types for the print-shop quoting service
//!
//! Wire models used by the server and any API client. All models serialize
//! with camelCase field names to stay compatible with the existing backup
//! files and API consumers.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
