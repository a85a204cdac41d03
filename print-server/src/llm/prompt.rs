//! Prompt Assembly
//!
//! Builds the calculation and chat prompts. The text contract matters:
//! the model is told to use only the supplied price tables, apply the
//! ceiling rule over breakpoints, refuse when the tables are empty and
//! return every numeric field as a string.

use serde_json::json;
use shared::models::{CalculationRequest, ChatMessage, FileInfo, Product};

/// Prompt for a single form-driven calculation
pub fn calculation_prompt(request: &CalculationRequest, price_list: &str) -> String {
    // File payloads travel as separate inline parts, only the name goes
    // into the prompt text
    let request_json = json!({
        "request": request.form,
        "file": request.file.as_ref().map(|f| json!({ "name": f.name })),
    });

    format!(
        r#"Sen poligrafiya xizmatlari uchun FOYDALANUVCHI TOMONIDAN TAQDIM ETILGAN narxlar jadvaliga asoslanib narx hisoblaydigan, xatolarga yo'l qo'ymaydigan kalkulyatsiya mexanizmisansan.
Sening yagona vazifang - so'rovga asoslanib, FAQAT quyida berilgan narxlar jadvalidan foydalangan holda narxni hisoblab, belgilangan JSON formatida qaytarish. Taxmin qilish yoki o'zingdan narx qo'shish QAT'IYAN MAN ETILADI.

**MUHIM QOIDA:** Agar narxlar jadvali bo'sh bo'lsa yoki "Narxlar jadvali kiritilmagan" degan xabarni o'z ichiga olsa, hisoblashdan bosh tort va xato qaytar: "Hisoblash uchun narxlar kiritilmagan. Iltimos, sozlamalardan narxlar jadvalini to'ldiring."

**HISOB-KITOB ALGORITMI:**
1. MOS JADVALNI TOPISH: so'rovdagi 'productType' va xususiyatlariga ('material', 'lamination', 'coverMaterial' va hokazo) qarab, `### Mahsulot Nomi (Xususiyat: Qiymat)` sarlavhali jadvallardan to'liq mos keladiganini top.
2. HISOB-KITOB TURI: jadval ustun sarlavhasiga qara - 'Yuza (m²)' bo'lsa YUZA bo'yicha, 'Sahifalar soni' bo'lsa SAHIFA bo'yicha, 'Soni' bo'lsa SONI bo'yicha.
3. NARXNI HISOBLASH:
   - YUZA: umumiy yuza = (width_mm * height_mm / 1000000) * quantity. Jadvaldan shu yuzadan KATTA yoki TENG (>=) bo'lgan BIRINCHI qatorni top va 'Summasi'ni ol.
   - SAHIFA: 'pageCount'dan KATTA yoki TENG (>=) bo'lgan BIRINCHI qatorni top. Yakuniy narx = narx_1_sahifa * pageCount * quantity.
   - SONI: 'quantity'dan KATTA yoki TENG (>=) bo'lgan BIRINCHI qatorni top va 'Summasi'ni ol.
4. ISTISNOLAR:
   - Agar so'ralgan qiymat jadvaldagi ENG KATTA sondan ko'p bo'lsa, eng katta qatorning 'Narxi'ni so'ralgan qiymatga ko'paytir.
   - Agar ENG KICHIK sondan kam bo'lsa, eng kichik qator uchun belgilangan 'Summasi'ni ol.
   - SHOSHILINCHLIK: 'urgency' 'express' bo'lsa yakuniy narxni 25% ga, 'super_express' bo'lsa 50% ga oshir.
   - 'calculationExplanation'da qaysi jadval va qator tanlanganini aniq tushuntir.
---
**NARXLAR JADVALI:**
{price_list}
---
**KIRUVCHI SO'ROV:**
{request_json}
---
**CHIQISH:** Faqat JSON obyektini qaytar. Barcha raqamli maydonlar STRING bo'lishi shart."#
    )
}

/// Prompt for the conversational assistant
pub fn chat_prompt(
    history: &[ChatMessage],
    message: &str,
    price_list: &str,
    products: &[Product],
    file: Option<&FileInfo>,
) -> String {
    let product_list = products
        .iter()
        .map(|p| {
            let (width, height) = p
                .default_state
                .as_ref()
                .map(|s| (s.width, s.height))
                .unwrap_or((0.0, 0.0));
            let size = if width > 0.0 && height > 0.0 {
                format!("{}x{}mm", width, height)
            } else {
                "N/A".to_string()
            };
            format!("- {} (ID: {}, standart o'lchami: {})", p.name, p.id, size)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let history_json = serde_json::to_string(history).unwrap_or_else(|_| "[]".to_string());
    let incoming = json!({
        "message": message,
        "file": file
            .map(|f| json!({ "name": f.name, "mimeType": f.mime_type }))
            .unwrap_or_else(|| json!("No file")),
    });

    format!(
        r#"Sen "Print-Master Pro"san, poligrafiya bo'yicha super-intellektual yordamchi. Vazifang nafaqat hisoblash, balki mijoz uchun eng yaxshi va tejamkor yechimni topishda yordam berish.

MAVJUD MAHSULOTLAR RO'YXATI:
{product_list}

**OLTIN QOIDALAR:**
1. NARXLAR JADVALINI TEKSHIRISH: agar jadval bo'sh bo'lsa, foydalanuvchiga sozlamalardan jadvalni to'ldirish kerakligini muloyimlik bilan tushuntir.
2. "HAMMASI YOKI HECH NIMA" QOIDASI: so'rovdagi BARCHA mahsulotlar uchun ma'lumot to'liq bo'lsagina 'responseType'ni "CALCULATIONS" qil. Kamida bitta mahsulot uchun ma'lumot yetishmasa, 'responseType'ni "TEXT" qil, 'calculationResults'ni null qil va yetishmayotgan ma'lumotlarni bitta xabarda so'ra. QISMAN HISOB-KITOB QILMA!
3. HISOB-KITOB QOIDALARI ("CALCULATIONS" rejimida): har bir mahsulot uchun alohida hisob-kitob ob'ektini yarat. 'requestData.productType'ga RO'YXATdagi nom bilan bir xil nom yoz. O'lcham aytilmasa, standartini ishlat. Mahsulot turiga qarab (SONI, YUZA yoki SAHIFA) jadvaldagi miqdordan KATTA yoki TENG (>=) bo'lgan birinchi qatorni topib, 'Summasi'ni ol yoki 'Narxi'ni ko'paytir. Barcha raqamli qiymatlarni STRING formatida qaytar.
4. AQLLI MASLAHATCHI: optimallashtirish imkoniyatlarini qidir. Agar 800 ta mahsulot so'ralsa, lekin 1000 ta uchun narx arzonroq bo'lsa, shuni taklif qil.
5. TEZKOR AMALLAR: suhbatni davom ettiruvchi 3-4 ta qisqa harakat taklif qil ('suggestedActions').
---
**NARXLAR JADVALI:**
{price_list}
---
**SUHBAT TARIXI:**
{history_json}
---
**KIRUVCHI XABAR:**
{incoming}
---
**CHIQISH:** Faqatgina so'ralgan JSON obyektini qaytar. Boshqa hech qanday matn, izoh yoki belgi qo'shma."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::FormState;

    #[test]
    fn test_calculation_prompt_embeds_table_and_request() {
        let request = CalculationRequest {
            form: FormState {
                product_type: "vizitka".to_string(),
                quantity: 500.0,
                ..FormState::default()
            },
            file: None,
        };
        let prompt = calculation_prompt(&request, "### Vizitka\n| Soni | ... |");
        assert!(prompt.contains("### Vizitka"));
        assert!(prompt.contains("\"productType\":\"vizitka\""));
        assert!(prompt.contains("STRING"));
    }

    #[test]
    fn test_calculation_prompt_excludes_file_payload() {
        let request = CalculationRequest {
            form: FormState::default(),
            file: Some(FileInfo {
                data: "QkFTRTY0".to_string(),
                mime_type: "application/pdf".to_string(),
                name: "maket.pdf".to_string(),
            }),
        };
        let prompt = calculation_prompt(&request, "jadval");
        assert!(prompt.contains("maket.pdf"));
        assert!(!prompt.contains("QkFTRTY0"));
    }

    #[test]
    fn test_chat_prompt_lists_products_with_default_sizes() {
        let product = Product {
            id: "vizitka".to_string(),
            name: "Vizitka".to_string(),
            description: String::new(),
            icon: "credit-card".to_string(),
            fields: Vec::new(),
            pricing_dimension: Default::default(),
            pricing_attributes: Vec::new(),
            default_state: Some(FormState {
                width: 90.0,
                height: 50.0,
                ..FormState::default()
            }),
        };
        let prompt = chat_prompt(&[], "500 ta vizitka", "jadval", &[product], None);
        assert!(prompt.contains("- Vizitka (ID: vizitka, standart o'lchami: 90x50mm)"));
        assert!(prompt.contains("500 ta vizitka"));
    }
}
