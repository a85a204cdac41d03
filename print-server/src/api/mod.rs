//! API Routes
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - registration, login and profile
//! - [`products`] - product catalog (public read, admin write)
//! - [`materials`] - material registry
//! - [`templates`] - preset templates
//! - [`tariff_plans`] - subscription plans
//! - [`promo_codes`] - promo code management and validation
//! - [`price_list`] - per-user price tables and tier operations
//! - [`calculations`] - price calculation and assistant chat
//! - [`orders`] - order placement and tracking
//! - [`subscriptions`] - subscription management
//! - [`users`] - admin user management
//! - [`audit_log`] - admin action trail

pub mod audit_log;
pub mod auth;
pub mod calculations;
pub mod health;
pub mod materials;
pub mod orders;
pub mod price_list;
pub mod products;
pub mod promo_codes;
pub mod subscriptions;
pub mod tariff_plans;
pub mod templates;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
