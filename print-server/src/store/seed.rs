//! Catalog Seeds
//!
//! First-run defaults for the product catalog, material registry,
//! templates and tariff plans. Applied only when the matching data file
//! does not exist yet; after that the persisted state is authoritative.

use shared::models::{
    FormField, FormState, Material, PlanPeriod, PricingAttribute, PricingDimension, Product,
    TariffPlan, Template, Urgency,
};

use FormField as F;
use PricingAttribute as A;

fn product(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    fields: Vec<FormField>,
    pricing_dimension: PricingDimension,
    pricing_attributes: Vec<PricingAttribute>,
    default_state: FormState,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        fields,
        pricing_dimension,
        pricing_attributes,
        default_state: Some(default_state),
    }
}

pub fn default_products() -> Vec<Product> {
    vec![
        product(
            "vizitka",
            "Vizitka",
            "Standart o'lchamdagi vizitkalar",
            "CreditCard",
            vec![F::Dimensions, F::Material, F::Quantity, F::Color, F::Lamination, F::FileUpload, F::Urgency],
            PricingDimension::Quantity,
            vec![A::Material, A::Lamination],
            FormState {
                width: 90.0,
                height: 50.0,
                material: "coated-300".to_string(),
                quantity: 1000.0,
                color: "4+4".to_string(),
                lamination: "matte".to_string(),
                urgency: Urgency::Standard,
                ..FormState::default()
            },
        ),
        product(
            "flayer",
            "Flayer",
            "Reklama varaqalari",
            "Newspaper",
            vec![F::Dimensions, F::Material, F::Quantity, F::Color, F::FileUpload, F::Urgency],
            PricingDimension::Quantity,
            vec![A::Material],
            FormState {
                width: 99.0,
                height: 210.0,
                material: "coated-150".to_string(),
                quantity: 1000.0,
                color: "4+4".to_string(),
                ..FormState::default()
            },
        ),
        product(
            "buklet",
            "Buklet",
            "Bir necha buklangan mahsulot",
            "BookOpen",
            vec![F::Dimensions, F::Material, F::Quantity, F::Color, F::Lamination, F::FileUpload, F::Urgency],
            PricingDimension::Quantity,
            vec![A::Material, A::Lamination],
            FormState {
                width: 210.0,
                height: 297.0,
                material: "coated-150".to_string(),
                quantity: 500.0,
                color: "4+4".to_string(),
                lamination: "glossy".to_string(),
                ..FormState::default()
            },
        ),
        product(
            "katalog",
            "Katalog",
            "Ko'p sahifali mahsulot katalogi",
            "Presentation",
            vec![
                F::Dimensions, F::PageCount, F::CoverMaterial, F::InnerMaterial, F::BindingType,
                F::Quantity, F::Color, F::Lamination, F::FileUpload, F::Urgency,
            ],
            PricingDimension::Quantity,
            vec![A::CoverMaterial, A::InnerMaterial, A::BindingType, A::Lamination],
            FormState {
                width: 210.0,
                height: 297.0,
                page_count: Some(16.0),
                cover_material: Some("coated-300".to_string()),
                inner_material: Some("coated-150".to_string()),
                binding_type: Some("saddle-stitch".to_string()),
                quantity: 100.0,
                color: "4+4".to_string(),
                lamination: "matte".to_string(),
                ..FormState::default()
            },
        ),
        product(
            "blaknotlar",
            "Blaknotlar",
            "Firma uchun bloknotlar",
            "BookMarked",
            vec![F::Dimensions, F::Material, F::BindingType, F::Quantity, F::Color, F::FileUpload, F::Urgency],
            PricingDimension::Quantity,
            vec![A::Material, A::BindingType],
            FormState {
                width: 148.0,
                height: 210.0,
                material: "offset-80".to_string(),
                binding_type: Some("wire-o".to_string()),
                quantity: 200.0,
                color: "1+0".to_string(),
                ..FormState::default()
            },
        ),
        product(
            "papka",
            "Papka",
            "Hujjatlar uchun firma papkalari",
            "Folder",
            vec![F::Dimensions, F::Material, F::Quantity, F::Color, F::Lamination, F::FileUpload, F::Urgency],
            PricingDimension::Quantity,
            vec![A::Material, A::Lamination],
            FormState {
                width: 220.0,
                height: 310.0,
                material: "cardboard-270".to_string(),
                quantity: 100.0,
                color: "4+0".to_string(),
                lamination: "matte".to_string(),
                ..FormState::default()
            },
        ),
        product(
            "banner",
            "Banner",
            "Katta formatli reklama bannerlari",
            "Square",
            vec![F::Dimensions, F::Material, F::Quantity, F::FileUpload, F::Urgency],
            PricingDimension::AreaSqm,
            vec![A::Material],
            FormState {
                width: 2000.0,
                height: 1000.0,
                material: "banner-flex".to_string(),
                quantity: 1.0,
                ..FormState::default()
            },
        ),
        product(
            "tablichka",
            "Tablichka",
            "Ofis va eshik uchun belgilar",
            "Clipboard",
            vec![F::Dimensions, F::Material, F::Quantity, F::FileUpload, F::Urgency],
            PricingDimension::AreaSqm,
            vec![A::Material],
            FormState {
                width: 300.0,
                height: 200.0,
                material: "pvc-3mm".to_string(),
                quantity: 1.0,
                ..FormState::default()
            },
        ),
        product(
            "samokleyka",
            "Samokleyka",
            "O'zi yopishqoq stikerlar",
            "Sticker",
            vec![F::Dimensions, F::Material, F::Quantity, F::Color, F::FileUpload, F::Urgency],
            PricingDimension::AreaSqm,
            vec![A::Material],
            FormState {
                width: 1000.0,
                height: 1000.0,
                material: "sticker-paper".to_string(),
                quantity: 1.0,
                color: "4+0".to_string(),
                ..FormState::default()
            },
        ),
        product(
            "kitob",
            "Kitob chop etish",
            "Kitob va jurnallar nashri",
            "BookCopy",
            vec![
                F::Dimensions, F::PageCount, F::CoverMaterial, F::InnerMaterial, F::BindingType,
                F::Quantity, F::Color, F::Lamination, F::FileUpload, F::Urgency,
            ],
            PricingDimension::PageCount,
            vec![A::CoverMaterial, A::InnerMaterial, A::BindingType, A::Lamination],
            FormState {
                width: 148.0,
                height: 210.0,
                page_count: Some(96.0),
                cover_material: Some("cardboard-270".to_string()),
                inner_material: Some("offset-80".to_string()),
                binding_type: Some("perfect-binding".to_string()),
                quantity: 500.0,
                color: "1+1".to_string(),
                lamination: "matte".to_string(),
                ..FormState::default()
            },
        ),
        product(
            "boshqalar",
            "Boshqa xizmatlar",
            "Maxsus buyurtma va hisob-kitob",
            "FileQuestion",
            vec![F::Dimensions, F::Depth, F::Material, F::Quantity, F::Color, F::Lamination, F::FileUpload, F::Urgency],
            PricingDimension::Quantity,
            Vec::new(),
            FormState {
                width: 100.0,
                height: 100.0,
                quantity: 100.0,
                material: "coated-150".to_string(),
                color: "4+0".to_string(),
                lamination: "none".to_string(),
                ..FormState::default()
            },
        ),
    ]
}

pub fn default_materials() -> Vec<Material> {
    [
        ("coated-150", "Melovanniy qog'oz 150gr"),
        ("coated-300", "Melovanniy qog'oz 300gr"),
        ("offset-80", "Ofset qog'oz 80gr"),
        ("offset-120", "Ofset qog'oz 120gr"),
        ("designer-250", "Dizaynerlik qog'oz 250gr"),
        ("cardboard-270", "Karton 270gr (quti uchun)"),
        ("sticker-paper", "O'zi yopishqoq qog'oz"),
        ("sticker-film", "O'zi yopishqoq plyonka (vinil)"),
        ("banner-flex", "Banner matosi (flex)"),
        ("pvc-3mm", "PVX plastik 3mm"),
        ("pvc-5mm", "PVX plastik 5mm"),
        ("other", "Boshqa (o'zingiz kiriting)"),
    ]
    .into_iter()
    .map(|(id, name)| Material {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

pub fn default_templates() -> Vec<Template> {
    vec![
        Template {
            id: "classic-business-card".to_string(),
            name: "Klassik Vizitka".to_string(),
            description: "Tezkor va standart yechim. 300gr qog'oz, ikki tomonlama rangli."
                .to_string(),
            preview_color: "bg-slate-200".to_string(),
            product_id: "vizitka".to_string(),
            default_state: FormState {
                quantity: 100.0,
                material: "coated-300".to_string(),
                color: "4+4".to_string(),
                lamination: "none".to_string(),
                width: 90.0,
                height: 50.0,
                ..FormState::default()
            },
        },
        Template {
            id: "premium-laminated-card".to_string(),
            name: "Premium Laminatli Vizitka".to_string(),
            description: "Matoviy laminatsiya bilan qoplangan, mustahkam va ko'rkam vizitkalar."
                .to_string(),
            preview_color: "bg-slate-700".to_string(),
            product_id: "vizitka".to_string(),
            default_state: FormState {
                quantity: 100.0,
                material: "coated-300".to_string(),
                color: "4+4".to_string(),
                lamination: "matte".to_string(),
                width: 90.0,
                height: 50.0,
                ..FormState::default()
            },
        },
        Template {
            id: "euro-flayer".to_string(),
            name: "Yevro Flayer".to_string(),
            description: "Reklama va e'lonlar uchun mashhur Yevro formatdagi flayerlar."
                .to_string(),
            preview_color: "bg-sky-200".to_string(),
            product_id: "flayer".to_string(),
            default_state: FormState {
                quantity: 500.0,
                material: "coated-150".to_string(),
                color: "4+4".to_string(),
                width: 99.0,
                height: 210.0,
                ..FormState::default()
            },
        },
        Template {
            id: "a5-booklet".to_string(),
            name: "A5 Buklet".to_string(),
            description: "Kompaniya va mahsulotlar taqdimoti uchun ixcham bukletlar.".to_string(),
            preview_color: "bg-rose-200".to_string(),
            product_id: "buklet".to_string(),
            default_state: FormState {
                quantity: 100.0,
                material: "coated-150".to_string(),
                color: "4+4".to_string(),
                lamination: "glossy".to_string(),
                width: 148.0,
                height: 210.0,
                ..FormState::default()
            },
        },
    ]
}

pub fn default_tariff_plans() -> Vec<TariffPlan> {
    vec![
        TariffPlan {
            id: "basic".to_string(),
            name: "Asosiy".to_string(),
            price: 500_000.0,
            period: PlanPeriod::Monthly,
            features: vec![
                "10 tagacha xodim".to_string(),
                "Asosiy hisob-kitoblar".to_string(),
                "Buyurtma tarixi".to_string(),
                "Email qo'llab-quvvatlash".to_string(),
            ],
        },
        TariffPlan {
            id: "pro".to_string(),
            name: "Professional".to_string(),
            price: 1_500_000.0,
            period: PlanPeriod::Monthly,
            features: vec![
                "Cheksiz xodimlar".to_string(),
                "Barcha hisob-kitoblar".to_string(),
                "Narxlar jadvalini sozlash".to_string(),
                "Telefon orqali qo'llab-quvvatlash".to_string(),
            ],
        },
        TariffPlan {
            id: "enterprise".to_string(),
            name: "Korporativ".to_string(),
            price: 5_000_000.0,
            period: PlanPeriod::Monthly,
            features: vec![
                "Pro-dagi barcha imkoniyatlar".to_string(),
                "Shaxsiy menejer".to_string(),
                "API integratsiyasi".to_string(),
                "White-labeling".to_string(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_covers_all_pricing_dimensions() {
        let products = default_products();
        for dimension in [
            PricingDimension::Quantity,
            PricingDimension::AreaSqm,
            PricingDimension::PageCount,
        ] {
            assert!(
                products.iter().any(|p| p.pricing_dimension == dimension),
                "no seeded product priced by {:?}",
                dimension
            );
        }
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let products = default_products();
        let mut ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_templates_reference_seeded_products() {
        let products = default_products();
        for template in default_templates() {
            assert!(
                products.iter().any(|p| p.id == template.product_id),
                "template {} references missing product {}",
                template.id,
                template.product_id
            );
        }
    }

    #[test]
    fn test_material_registry_includes_other_sentinel() {
        assert!(default_materials().iter().any(|m| m.id == "other"));
    }
}
