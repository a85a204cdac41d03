//! Calculation Model
//!
//! Request/result value objects for a single price calculation. A result is
//! produced once and never mutated; re-editing the form produces a new one.

use serde::{Deserialize, Serialize};

use crate::models::product::FormState;

/// Production urgency, surcharging the base amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Standard,
    Express,
    SuperExpress,
}

impl Urgency {
    /// Surcharge multiplier applied to the base amount
    pub fn multiplier(&self) -> f64 {
        match self {
            Urgency::Standard => 1.0,
            Urgency::Express => 1.25,
            Urgency::SuperExpress => 1.5,
        }
    }
}

/// Uploaded file reference (payload travels base64-encoded)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Base64-encoded file content
    pub data: String,
    pub mime_type: String,
    pub name: String,
}

/// A calculation request is a realized form state plus an optional artwork file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(flatten)]
    pub form: FormState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileInfo>,
}

/// Unfolded (flat) dimensions for folded products
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UnfoldedDimensions {
    pub width: f64,
    pub height: f64,
}

/// One placed item in the sheet-nesting layout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NestingRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Preflight verdict for an uploaded artwork file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PreflightStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightCheck {
    pub status: PreflightStatus,
    pub message: String,
}

/// Computed cost breakdown for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    #[serde(default)]
    pub items_per_sheet: f64,
    #[serde(default)]
    pub total_sheets: f64,
    #[serde(default)]
    pub material_cost: f64,
    #[serde(default)]
    pub printing_cost: f64,
    #[serde(default)]
    pub post_press_cost: f64,
    pub total_cost: f64,
    #[serde(default)]
    pub unfolded_dimensions: Option<UnfoldedDimensions>,
    #[serde(default)]
    pub nesting_layout: Vec<NestingRect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preflight_check: Option<PreflightCheck>,
    /// Human-readable trace of which table and tier row were used
    pub calculation_explanation: String,
    /// Echo of the resolved request
    pub request_data: FormState,
}
