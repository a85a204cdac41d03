//! Price List Model
//!
//! The root pricing aggregate: a map from price-list key (product id plus a
//! sorted attribute combination) to an ascending list of price tiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat surcharge attached to a specific tier (e.g. corner rounding)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdditionalService {
    pub id: String,
    pub name: String,
    /// Flat cost added on top of the tier's base amount
    pub cost: f64,
}

/// One row of a price table
///
/// Derived relationship: `summasi = round(soni * narxi) + sum(service costs)`.
/// Field names are part of the wire format shared with existing backups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    pub id: String,
    /// Breakpoint: quantity, area in m² or page count, per the product's
    /// pricing dimension
    pub soni: f64,
    /// Unit price (per item, per m² or per page)
    pub narxi: f64,
    /// Total amount at the breakpoint, services included
    pub summasi: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_services: Option<Vec<AdditionalService>>,
    /// Free-text note shown in the price table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub izoh: Option<String>,
}

impl PriceTier {
    /// Sum of the flat service surcharges on this tier
    pub fn services_cost(&self) -> f64 {
        self.additional_services
            .as_deref()
            .map(|services| services.iter().map(|s| s.cost).sum())
            .unwrap_or(0.0)
    }
}

/// Map from price-list key to its ascending tier list.
///
/// BTreeMap keeps key iteration lexicographic, which the formatter relies on
/// for deterministic output.
pub type PriceVariants = BTreeMap<String, Vec<PriceTier>>;

/// Root pricing aggregate, persisted and replaced wholesale
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceList {
    #[serde(default)]
    pub variants: PriceVariants,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Wholesale replacement payload for `PUT /api/price-list`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceListUpdate {
    pub variants: PriceVariants,
}
