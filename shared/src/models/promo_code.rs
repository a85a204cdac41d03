//! Promo Code Model

use serde::{Deserialize, Serialize};

/// Discount kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromoKind {
    /// Percentage of the order subtotal
    Percentage,
    /// Fixed amount off the subtotal
    Fixed,
}

/// Promo code entity (id doubles as the code the customer enters)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PromoKind,
    pub value: f64,
    /// Times this code has been redeemed
    #[serde(default)]
    pub uses: u32,
    #[serde(default)]
    pub is_active: bool,
}

/// Create promo code payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeCreate {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PromoKind,
    pub value: f64,
    pub is_active: Option<bool>,
}

/// Update promo code payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeUpdate {
    #[serde(rename = "type")]
    pub kind: Option<PromoKind>,
    pub value: Option<f64>,
    pub is_active: Option<bool>,
}
