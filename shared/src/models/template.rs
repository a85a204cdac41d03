//! Template Model

use serde::{Deserialize, Serialize};

use crate::models::product::FormState;

/// Preset product configuration offered on the templates page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    /// CSS class used for the preview swatch (presentation-only)
    pub preview_color: String,
    pub product_id: String,
    pub default_state: FormState,
}

/// Create template payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCreate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub preview_color: Option<String>,
    pub product_id: String,
    pub default_state: FormState,
}

/// Update template payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub preview_color: Option<String>,
    pub product_id: Option<String>,
    pub default_state: Option<FormState>,
}
