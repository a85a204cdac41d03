//! Price List Key Codec
//!
//! A price-list key canonically identifies one (product, attribute
//! combination) pricing variant: the product id followed by `key=value`
//! pairs sorted by attribute key and joined with `:`. Attribute values
//! equal to the `other` sentinel (a custom free-text override) are omitted
//! from the key; the custom text travels out-of-band in the request.
//!
//! Two attribute maps that are equal as sets encode to the identical
//! string, so the variants map supports O(1) lookup.

use std::collections::BTreeMap;

use shared::models::Material;

/// Sentinel option id meaning "custom value not in the controlled vocabulary"
pub const OTHER_SENTINEL: &str = "other";

/// Key segment delimiter
const KEY_DELIMITER: char = ':';

/// Static lamination vocabulary: (option id, display name)
pub const LAMINATIONS: &[(&str, &str)] = &[
    ("none", "Laminatsiyasiz"),
    ("glossy", "Yaltiroq (Glossy)"),
    ("matte", "Matoviy (Matte)"),
    ("other", "Boshqa (o'zingiz kiriting)"),
];

/// Static binding-type vocabulary: (option id, display name)
pub const BINDING_TYPES: &[(&str, &str)] = &[
    ("saddle-stitch", "Skrepka (Saddle stitch)"),
    ("perfect-binding", "Termokley (Perfect binding)"),
    ("wire-o", "Prujina (Wire-O)"),
    ("hardcover", "Qattiq muqova (Hardcover)"),
    ("other", "Boshqa (o'zingiz kiriting)"),
];

/// Static color vocabulary: (option id, display name)
pub const COLORS: &[(&str, &str)] = &[
    ("4+0", "Bir tomonlama rangli (4+0)"),
    ("4+4", "Ikki tomonlama rangli (4+4)"),
    ("1+0", "Oq-qora (1+0)"),
    ("1+1", "Ikki tomonlama oq-qora (1+1)"),
    ("other", "Boshqa (o'zingiz kiriting)"),
];

/// Decoded price-list key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub product_id: String,
    pub attributes: BTreeMap<String, String>,
}

/// Encode a canonical price-list key from a product id and attribute map.
///
/// Pure function: identical semantic attribute sets always yield identical
/// strings regardless of insertion order. Empty and `other` values are
/// dropped.
pub fn encode_key(product_id: &str, attributes: &BTreeMap<String, String>) -> String {
    let attribute_string = attributes
        .iter()
        .filter(|(_, value)| !value.is_empty() && value.as_str() != OTHER_SENTINEL)
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(&KEY_DELIMITER.to_string());

    if attribute_string.is_empty() {
        product_id.to_string()
    } else {
        format!("{}{}{}", product_id, KEY_DELIMITER, attribute_string)
    }
}

/// Decode a price-list key back into product id and attributes.
///
/// Malformed segments (missing `=`) are silently dropped.
pub fn decode_key(key: &str) -> ParsedKey {
    let mut parts = key.split(KEY_DELIMITER);
    let product_id = parts.next().unwrap_or_default().to_string();

    let attributes = parts
        .filter_map(|part| {
            let (attr_key, attr_value) = part.split_once('=')?;
            if attr_key.is_empty() || attr_value.is_empty() {
                return None;
            }
            Some((attr_key.to_string(), attr_value.to_string()))
        })
        .collect();

    ParsedKey {
        product_id,
        attributes,
    }
}

/// Display label for an internal attribute name, falling back to the raw key
pub fn attribute_display_name(attribute_key: &str) -> &str {
    match attribute_key {
        "material" => "Material",
        "lamination" => "Laminatsiya",
        "coverMaterial" => "Muqova Materiali",
        "innerMaterial" => "Ichki Sahifa Materiali",
        "bindingType" => "Muqova Turi",
        other => other,
    }
}

/// Resolve an option id to a human label: material registry first, then the
/// static lamination/binding tables, falling back to the raw id.
pub fn option_display_name(option_id: &str, materials: &[Material]) -> String {
    if let Some(material) = materials.iter().find(|m| m.id == option_id) {
        return material.name.clone();
    }

    LAMINATIONS
        .iter()
        .chain(BINDING_TYPES.iter())
        .find(|(id, _)| *id == option_id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| option_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_encode_bare_product() {
        assert_eq!(encode_key("vizitka", &BTreeMap::new()), "vizitka");
    }

    #[test]
    fn test_encode_sorts_attribute_keys() {
        let key = encode_key(
            "vizitka",
            &attrs(&[("material", "coated-300"), ("lamination", "matte")]),
        );
        assert_eq!(key, "vizitka:lamination=matte:material=coated-300");
    }

    #[test]
    fn test_encode_drops_other_sentinel() {
        let key = encode_key(
            "vizitka",
            &attrs(&[("material", "other"), ("lamination", "matte")]),
        );
        assert_eq!(key, "vizitka:lamination=matte");

        // All attributes custom: bare product id
        let key = encode_key("vizitka", &attrs(&[("material", "other")]));
        assert_eq!(key, "vizitka");
    }

    #[test]
    fn test_decode_round_trip() {
        let original = attrs(&[("material", "coated-300"), ("lamination", "glossy")]);
        let parsed = decode_key(&encode_key("buklet", &original));
        assert_eq!(parsed.product_id, "buklet");
        assert_eq!(parsed.attributes, original);
    }

    #[test]
    fn test_decode_drops_malformed_segments() {
        let parsed = decode_key("vizitka:material=coated-300:junk:=x:empty=");
        assert_eq!(parsed.product_id, "vizitka");
        assert_eq!(parsed.attributes, attrs(&[("material", "coated-300")]));
    }

    #[test]
    fn test_encode_order_independence() {
        // BTreeMap already sorts, but make sure two differently-built maps agree
        let mut a = BTreeMap::new();
        a.insert("material".to_string(), "coated-150".to_string());
        a.insert("bindingType".to_string(), "wire-o".to_string());

        let mut b = BTreeMap::new();
        b.insert("bindingType".to_string(), "wire-o".to_string());
        b.insert("material".to_string(), "coated-150".to_string());

        assert_eq!(encode_key("blaknotlar", &a), encode_key("blaknotlar", &b));
    }

    #[test]
    fn test_attribute_display_name_fallback() {
        assert_eq!(attribute_display_name("material"), "Material");
        assert_eq!(attribute_display_name("unknown"), "unknown");
    }

    #[test]
    fn test_option_display_name_precedence() {
        let materials = vec![Material {
            id: "coated-300".to_string(),
            name: "Melovanniy qog'oz 300gr".to_string(),
        }];
        assert_eq!(
            option_display_name("coated-300", &materials),
            "Melovanniy qog'oz 300gr"
        );
        assert_eq!(option_display_name("matte", &materials), "Matoviy (Matte)");
        assert_eq!(option_display_name("mystery", &materials), "mystery");
    }
}
