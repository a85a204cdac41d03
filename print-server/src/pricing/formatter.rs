//! Price Table Formatter
//!
//! Renders the variants map as markdown tables for the assistant prompt.
//! Output is deterministic: variant keys iterate lexicographically and
//! tier rows are printed in ascending breakpoint order. Keys whose product
//! no longer exists are skipped.

use shared::models::{Material, PriceVariants, PricingDimension, Product};

use super::{attribute_display_name, decode_key, option_display_name};

/// Returned when the variants map is empty
pub const EMPTY_TABLE_MESSAGE: &str = "Narxlar jadvali kiritilmagan. Foydalanuvchiga hisob-kitob qilish uchun narxlar jadvalini to'ldirish kerakligini ayting.";

/// Returned when every variant was skipped (stale keys only)
pub const BLANK_TABLE_MESSAGE: &str = "Narxlar jadvali bo'sh. Foydalanuvchiga hisob-kitob qilish uchun narxlar jadvalini to'ldirish kerakligini ayting.";

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Column label for the breakpoint, per the product's pricing dimension
fn breakpoint_label(dimension: PricingDimension) -> &'static str {
    match dimension {
        PricingDimension::Quantity => "Soni",
        PricingDimension::AreaSqm => "Yuza (m²)",
        PricingDimension::PageCount => "Sahifalar soni",
    }
}

/// Render the full variants map as markdown for the assistant prompt
pub fn format_price_list(
    variants: &PriceVariants,
    products: &[Product],
    materials: &[Material],
) -> String {
    if variants.is_empty() {
        return EMPTY_TABLE_MESSAGE.to_string();
    }

    let mut output = String::new();

    // BTreeMap iteration is already lexicographic by key
    for (key, tiers) in variants {
        if tiers.is_empty() {
            continue;
        }
        let parsed = decode_key(key);
        let Some(product) = products.iter().find(|p| p.id == parsed.product_id) else {
            continue;
        };

        let mut title = product.name.clone();
        let attribute_descriptions = parsed
            .attributes
            .iter()
            .map(|(attr_key, attr_value)| {
                format!(
                    "{}: {}",
                    attribute_display_name(attr_key),
                    option_display_name(attr_value, materials)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        if !attribute_descriptions.is_empty() {
            title.push_str(&format!(" ({})", attribute_descriptions));
        }

        output.push_str(&format!("### {}\n", title));
        output.push_str(&format!(
            "| {} | Narxi | Summasi | Izoh |\n",
            breakpoint_label(product.pricing_dimension)
        ));
        output.push_str("|---|---|---|---|\n");

        let mut sorted = tiers.clone();
        super::sort_tiers(&mut sorted);
        for tier in &sorted {
            let services = tier
                .additional_services
                .as_deref()
                .map(|services| {
                    services
                        .iter()
                        .map(|s| format!("{} (+{})", s.name, format_number(s.cost)))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            let note = [tier.izoh.clone().unwrap_or_default(), services]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                format_number(tier.soni),
                format_number(tier.narxi),
                format_number(tier.summasi),
                note
            ));
        }
        output.push('\n');
    }

    if output.trim().is_empty() {
        return BLANK_TABLE_MESSAGE.to_string();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{AdditionalService, PriceTier, PricingAttribute};
    use uuid::Uuid;

    fn tier(soni: f64, narxi: f64) -> PriceTier {
        PriceTier {
            id: Uuid::new_v4().to_string(),
            soni,
            narxi,
            summasi: (soni * narxi).round(),
            additional_services: None,
            izoh: None,
        }
    }

    fn product(id: &str, name: &str, dimension: PricingDimension) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            icon: "printer".to_string(),
            fields: Vec::new(),
            pricing_dimension: dimension,
            pricing_attributes: vec![PricingAttribute::Material],
            default_state: None,
        }
    }

    #[test]
    fn test_empty_variants_sentinel() {
        let output = format_price_list(&PriceVariants::new(), &[], &[]);
        assert_eq!(output, EMPTY_TABLE_MESSAGE);
    }

    #[test]
    fn test_stale_keys_only_sentinel() {
        let mut variants = PriceVariants::new();
        variants.insert("deleted-product".to_string(), vec![tier(100.0, 1000.0)]);
        let output = format_price_list(&variants, &[], &[]);
        assert_eq!(output, BLANK_TABLE_MESSAGE);
    }

    #[test]
    fn test_renders_title_with_attribute_labels() {
        let mut variants = PriceVariants::new();
        variants.insert(
            "vizitka:material=coated-300".to_string(),
            vec![tier(100.0, 1000.0)],
        );
        let products = vec![product("vizitka", "Vizitka", PricingDimension::Quantity)];
        let materials = vec![Material {
            id: "coated-300".to_string(),
            name: "Melovanniy qog'oz 300gr".to_string(),
        }];

        let output = format_price_list(&variants, &products, &materials);
        assert!(output.contains("### Vizitka (Material: Melovanniy qog'oz 300gr)"));
        assert!(output.contains("| Soni | Narxi | Summasi | Izoh |"));
        assert!(output.contains("| 100 | 1000 | 100000 |"));
    }

    #[test]
    fn test_dimension_specific_labels() {
        let mut variants = PriceVariants::new();
        variants.insert("banner".to_string(), vec![tier(1.0, 50_000.0)]);
        variants.insert("kitob".to_string(), vec![tier(100.0, 200.0)]);
        let products = vec![
            product("banner", "Banner", PricingDimension::AreaSqm),
            product("kitob", "Kitob", PricingDimension::PageCount),
        ];

        let output = format_price_list(&variants, &products, &[]);
        assert!(output.contains("| Yuza (m²) | Narxi | Summasi | Izoh |"));
        assert!(output.contains("| Sahifalar soni | Narxi | Summasi | Izoh |"));
    }

    #[test]
    fn test_note_merges_izoh_and_services() {
        let mut row = tier(100.0, 1000.0);
        row.izoh = Some("Qirqish bilan".to_string());
        row.additional_services = Some(vec![AdditionalService {
            id: Uuid::new_v4().to_string(),
            name: "Lak".to_string(),
            cost: 5000.0,
        }]);
        row.summasi = 105_000.0;

        let mut variants = PriceVariants::new();
        variants.insert("vizitka".to_string(), vec![row]);
        let products = vec![product("vizitka", "Vizitka", PricingDimension::Quantity)];

        let output = format_price_list(&variants, &products, &[]);
        assert!(output.contains("| 100 | 1000 | 105000 | Qirqish bilan, Lak (+5000) |"));
    }

    #[test]
    fn test_deterministic_output() {
        let mut variants = PriceVariants::new();
        variants.insert("vizitka".to_string(), vec![tier(500.0, 800.0), tier(100.0, 1000.0)]);
        variants.insert("buklet".to_string(), vec![tier(100.0, 2000.0)]);
        let products = vec![
            product("vizitka", "Vizitka", PricingDimension::Quantity),
            product("buklet", "Buklet", PricingDimension::Quantity),
        ];

        let first = format_price_list(&variants, &products, &[]);
        let second = format_price_list(&variants, &products, &[]);
        assert_eq!(first, second);
        // Lexicographic key order: buklet section precedes vizitka
        assert!(first.find("### Buklet").unwrap() < first.find("### Vizitka").unwrap());
        // Rows in ascending breakpoint order
        assert!(first.find("| 100 | 1000 |").unwrap() < first.find("| 500 | 800 |").unwrap());
    }
}
