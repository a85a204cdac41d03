//! Data models
//!
//! Shared between print-server and API clients. String IDs throughout;
//! tier and service ids are UUID v4 strings minted by the server.

pub mod audit;
pub mod calculation;
pub mod chat;
pub mod material;
pub mod order;
pub mod price_list;
pub mod product;
pub mod promo_code;
pub mod subscription;
pub mod tariff_plan;
pub mod template;
pub mod user;

// Re-exports
pub use audit::*;
pub use calculation::*;
pub use chat::*;
pub use material::*;
pub use order::*;
pub use price_list::*;
pub use product::*;
pub use promo_code::*;
pub use subscription::*;
pub use tariff_plan::*;
pub use template::*;
pub use user::*;
