//! Tariff Plan Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanPeriod {
    #[default]
    Monthly,
    Yearly,
}

/// Subscription tariff plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffPlan {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub period: PlanPeriod,
    pub features: Vec<String>,
}

/// Create tariff plan payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffPlanCreate {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub period: Option<PlanPeriod>,
    pub features: Option<Vec<String>>,
}

/// Update tariff plan payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffPlanUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub period: Option<PlanPeriod>,
    pub features: Option<Vec<String>>,
}
