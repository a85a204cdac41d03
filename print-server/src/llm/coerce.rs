//! Response Coercion
//!
//! The model answers with all numerics as strings, and not always cleanly:
//! markdown fences, missing optional fields and junk values all occur in
//! practice. Coercion is lenient by contract: any value that does not
//! parse as a finite number becomes 0, mirroring how the results are
//! consumed downstream.

use serde_json::Value;
use shared::models::{
    CalculationResult, FormState, NestingRect, PreflightCheck, PreflightStatus,
    UnfoldedDimensions, Urgency,
};

use crate::utils::{AppError, AppResult};

/// Strip a ```json ... ``` fence if the model wrapped its answer in one
pub fn strip_json_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// `Number(x) || 0` semantics: number, numeric string or bust
fn number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Like [`number`], but zero maps to None
fn optional_number(value: &Value) -> Option<f64> {
    let n = number(value);
    if n == 0.0 { None } else { Some(n) }
}

fn string(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn optional_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn urgency(value: &Value) -> Urgency {
    match value.as_str() {
        Some("express") => Urgency::Express,
        Some("super_express") => Urgency::SuperExpress,
        _ => Urgency::Standard,
    }
}

fn preflight(value: &Value) -> Option<PreflightCheck> {
    let obj = value.as_object()?;
    let status = match obj.get("status").and_then(Value::as_str)? {
        "OK" => PreflightStatus::Ok,
        "WARNING" => PreflightStatus::Warning,
        "ERROR" => PreflightStatus::Error,
        _ => return None,
    };
    Some(PreflightCheck {
        status,
        message: obj.get("message").map(string).unwrap_or_default(),
    })
}

fn form_state(value: &Value) -> FormState {
    let get = |key: &str| value.get(key).cloned().unwrap_or(Value::Null);
    FormState {
        product_type: string(&get("productType")),
        width: number(&get("width")),
        height: number(&get("height")),
        depth: optional_number(&get("depth")),
        material: string(&get("material")),
        custom_material: optional_string(&get("customMaterial")),
        quantity: number(&get("quantity")),
        color: string(&get("color")),
        custom_color: optional_string(&get("customColor")),
        lamination: string(&get("lamination")),
        custom_lamination: optional_string(&get("customLamination")),
        urgency: urgency(&get("urgency")),
        page_count: optional_number(&get("pageCount")),
        cover_material: optional_string(&get("coverMaterial")),
        custom_cover_material: optional_string(&get("customCoverMaterial")),
        inner_material: optional_string(&get("innerMaterial")),
        custom_inner_material: optional_string(&get("customInnerMaterial")),
        binding_type: optional_string(&get("bindingType")),
        custom_binding_type: optional_string(&get("customBindingType")),
    }
}

/// Coerce one raw result object into a typed [`CalculationResult`].
///
/// `totalCost`, `calculationExplanation` and `requestData` are required;
/// everything else degrades to defaults.
pub fn coerce_calculation_result(raw: &Value) -> AppResult<CalculationResult> {
    let obj = raw
        .as_object()
        .ok_or_else(|| AppError::External("Model returned a non-object result".to_string()))?;

    let explanation = obj
        .get("calculationExplanation")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AppError::External("Model result is missing calculationExplanation".to_string())
        })?
        .to_string();
    let request_data = obj
        .get("requestData")
        .filter(|v| v.is_object())
        .map(form_state)
        .ok_or_else(|| AppError::External("Model result is missing requestData".to_string()))?;
    let total_cost = obj
        .get("totalCost")
        .map(number)
        .ok_or_else(|| AppError::External("Model result is missing totalCost".to_string()))?;

    let get = |key: &str| obj.get(key).cloned().unwrap_or(Value::Null);

    let unfolded_dimensions = get("unfoldedDimensions").as_object().map(|dims| {
        UnfoldedDimensions {
            width: dims.get("width").map(number).unwrap_or(0.0),
            height: dims.get("height").map(number).unwrap_or(0.0),
        }
    });

    let nesting_layout = get("nestingLayout")
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|item| NestingRect {
                    x: item.get("x").map(number).unwrap_or(0.0),
                    y: item.get("y").map(number).unwrap_or(0.0),
                    width: item.get("width").map(number).unwrap_or(0.0),
                    height: item.get("height").map(number).unwrap_or(0.0),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(CalculationResult {
        items_per_sheet: number(&get("itemsPerSheet")),
        total_sheets: number(&get("totalSheets")),
        material_cost: number(&get("materialCost")),
        printing_cost: number(&get("printingCost")),
        post_press_cost: number(&get("postPressCost")),
        total_cost,
        unfolded_dimensions,
        nesting_layout,
        advice: optional_string(&get("advice")),
        preflight_check: preflight(&get("preflightCheck")),
        calculation_explanation: explanation,
        request_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_json_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_json_fence("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(number(&json!("150000")), 150_000.0);
        assert_eq!(number(&json!("1,500")), 1500.0);
        assert_eq!(number(&json!(42.5)), 42.5);
        assert_eq!(number(&json!("not a number")), 0.0);
        assert_eq!(number(&json!(null)), 0.0);
        assert_eq!(number(&json!([1])), 0.0);
    }

    #[test]
    fn test_coerce_minimal_result() {
        let raw = json!({
            "totalCost": "150000",
            "calculationExplanation": "Vizitka jadvali, 100 dona pog'onasi",
            "requestData": { "productType": "vizitka", "quantity": "100" }
        });
        let result = coerce_calculation_result(&raw).unwrap();
        assert_eq!(result.total_cost, 150_000.0);
        assert_eq!(result.request_data.product_type, "vizitka");
        assert_eq!(result.request_data.quantity, 100.0);
        assert_eq!(result.items_per_sheet, 0.0);
        assert!(result.nesting_layout.is_empty());
    }

    #[test]
    fn test_coerce_full_result() {
        let raw = json!({
            "itemsPerSheet": "24",
            "totalSheets": "5",
            "totalCost": "400000",
            "calculationExplanation": "x",
            "unfoldedDimensions": { "width": "297", "height": "210" },
            "nestingLayout": [ { "x": "0", "y": "0", "width": "90", "height": "50" } ],
            "preflightCheck": { "status": "WARNING", "message": "Low resolution" },
            "requestData": {
                "productType": "buklet",
                "quantity": "500",
                "urgency": "express",
                "pageCount": "8"
            }
        });
        let result = coerce_calculation_result(&raw).unwrap();
        assert_eq!(result.items_per_sheet, 24.0);
        assert_eq!(
            result.unfolded_dimensions,
            Some(UnfoldedDimensions { width: 297.0, height: 210.0 })
        );
        assert_eq!(result.nesting_layout.len(), 1);
        assert_eq!(
            result.preflight_check.as_ref().map(|p| p.status),
            Some(PreflightStatus::Warning)
        );
        assert_eq!(result.request_data.urgency, Urgency::Express);
        assert_eq!(result.request_data.page_count, Some(8.0));
    }

    #[test]
    fn test_missing_required_fields() {
        assert!(coerce_calculation_result(&json!("text")).is_err());
        assert!(coerce_calculation_result(&json!({ "totalCost": "1" })).is_err());
        assert!(
            coerce_calculation_result(&json!({
                "totalCost": "1",
                "calculationExplanation": "x"
            }))
            .is_err()
        );
    }
}
