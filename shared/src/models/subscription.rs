//! Subscription Model

use serde::{Deserialize, Serialize};

use crate::models::tariff_plan::TariffPlan;
use crate::models::user::User;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Cancelled,
    Expired,
}

/// Subscription entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: u64,
    pub user: User,
    pub plan: TariffPlan,
    pub status: SubscriptionStatus,
    pub expires_at: String,
}

/// Create subscription payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCreate {
    /// Subscriber's phone number
    pub user: String,
    pub plan: String,
    pub status: Option<SubscriptionStatus>,
    pub expires_at: String,
}

/// Update subscription payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionUpdate {
    pub plan: Option<String>,
    pub status: Option<SubscriptionStatus>,
    pub expires_at: Option<String>,
}
