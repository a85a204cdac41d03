//! Product Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::calculation::Urgency;

/// Form field capability a product exposes in the configurator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FormField {
    #[serde(rename = "dimensions")]
    Dimensions,
    #[serde(rename = "depth")]
    Depth,
    #[serde(rename = "material")]
    Material,
    #[serde(rename = "quantity")]
    Quantity,
    #[serde(rename = "color")]
    Color,
    #[serde(rename = "lamination")]
    Lamination,
    #[serde(rename = "file-upload")]
    FileUpload,
    #[serde(rename = "pageCount")]
    PageCount,
    #[serde(rename = "coverMaterial")]
    CoverMaterial,
    #[serde(rename = "innerMaterial")]
    InnerMaterial,
    #[serde(rename = "bindingType")]
    BindingType,
    #[serde(rename = "urgency")]
    Urgency,
}

/// Unit of measure a product is priced by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PricingDimension {
    /// Priced per unit count (default)
    #[default]
    #[serde(rename = "quantity")]
    Quantity,
    /// Priced per square meter of printed area
    #[serde(rename = "area_sqm")]
    AreaSqm,
    /// Priced per page, multiplied by the number of copies
    #[serde(rename = "pageCount")]
    PageCount,
}

/// Attribute names that participate in price-table keying
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum PricingAttribute {
    #[serde(rename = "material")]
    Material,
    #[serde(rename = "lamination")]
    Lamination,
    #[serde(rename = "coverMaterial")]
    CoverMaterial,
    #[serde(rename = "innerMaterial")]
    InnerMaterial,
    #[serde(rename = "bindingType")]
    BindingType,
}

impl PricingAttribute {
    /// Wire name, identical to the serde rename
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingAttribute::Material => "material",
            PricingAttribute::Lamination => "lamination",
            PricingAttribute::CoverMaterial => "coverMaterial",
            PricingAttribute::InnerMaterial => "innerMaterial",
            PricingAttribute::BindingType => "bindingType",
        }
    }
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Icon reference (lucide icon name, rendered client-side)
    pub icon: String,
    /// Ordered set of configurator fields
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub pricing_dimension: PricingDimension,
    /// Attributes relevant for price-table keying (subset of form fields)
    #[serde(default)]
    pub pricing_attributes: Vec<PricingAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_state: Option<FormState>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub fields: Vec<FormField>,
    pub pricing_dimension: Option<PricingDimension>,
    pub pricing_attributes: Option<Vec<PricingAttribute>>,
    pub default_state: Option<FormState>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub fields: Option<Vec<FormField>>,
    pub pricing_dimension: Option<PricingDimension>,
    pub pricing_attributes: Option<Vec<PricingAttribute>>,
    pub default_state: Option<FormState>,
}

/// A realized product configuration, as submitted by the calculator form.
///
/// Controlled-vocabulary attributes (`material`, `lamination`, ...) hold the
/// option id, with `other` as the custom-value sentinel; the free text for a
/// custom value travels in the matching `custom_*` field.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default)]
    pub material: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_material: Option<String>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<String>,
    #[serde(default)]
    pub lamination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_lamination: Option<String>,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_cover_material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_inner_material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_binding_type: Option<String>,
}

impl FormState {
    /// Value of a pricing attribute, empty string when unset
    pub fn attribute_value(&self, attr: PricingAttribute) -> &str {
        match attr {
            PricingAttribute::Material => &self.material,
            PricingAttribute::Lamination => &self.lamination,
            PricingAttribute::CoverMaterial => self.cover_material.as_deref().unwrap_or(""),
            PricingAttribute::InnerMaterial => self.inner_material.as_deref().unwrap_or(""),
            PricingAttribute::BindingType => self.binding_type.as_deref().unwrap_or(""),
        }
    }

    /// Pricing-attribute subset for key encoding (unset values excluded)
    pub fn pricing_attribute_map(&self, attrs: &[PricingAttribute]) -> BTreeMap<String, String> {
        attrs
            .iter()
            .filter_map(|attr| {
                let value = self.attribute_value(*attr);
                if value.is_empty() {
                    None
                } else {
                    Some((attr.as_str().to_string(), value.to_string()))
                }
            })
            .collect()
    }
}
