//! Calculation API Handlers
//!
//! Two calculation paths: `/api/calculate` runs the deterministic tier
//! resolver locally, while `/api/calculate/assist` asks the model to
//! price the request against the formatted tables (adding advice,
//! nesting and preflight). Both refuse when the caller's price table is
//! empty, the assisted path before any model call.

use axum::{Json, extract::State};
use shared::models::{
    CalculationRequest, CalculationResult, ChatReply, ChatRequest, ChatResponseType, Product,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::pricing;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Formatted price table for the calling user, or `NoPriceTable` when
/// there is nothing to price against
fn price_table_for(state: &ServerState, phone: &str) -> AppResult<String> {
    let list = state.store.price_list(phone);
    if list.variants.is_empty() {
        return Err(AppError::NoPriceTable(
            "Hisoblash uchun narxlar kiritilmagan. Iltimos, sozlamalardan narxlar jadvalini to'ldiring.".to_string(),
        ));
    }
    let products = state.store.products.read().clone();
    let materials = state.store.materials.read().clone();
    let table = pricing::format_price_list(&list.variants, &products, &materials);
    if table == pricing::EMPTY_TABLE_MESSAGE || table == pricing::BLANK_TABLE_MESSAGE {
        return Err(AppError::NoPriceTable(
            "Hisoblash uchun narxlar kiritilmagan. Iltimos, sozlamalardan narxlar jadvalini to'ldiring.".to_string(),
        ));
    }
    Ok(table)
}

fn find_product(state: &ServerState, product_type: &str) -> AppResult<Product> {
    state
        .store
        .products
        .read()
        .iter()
        .find(|p| p.id == product_type || p.name == product_type)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Unknown product: {}", product_type)))
}

/// POST /api/calculate - deterministic tier resolution, no model
pub async fn calculate(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(request): Json<CalculationRequest>,
) -> AppResult<Json<AppResponse<CalculationResult>>> {
    let product = find_product(&state, &request.form.product_type)?;
    let list = state.store.price_list(&current.phone);
    let result = pricing::resolve(&product, &request.form, &list.variants)?;
    Ok(ok(result))
}

/// POST /api/calculate/assist - model-assisted calculation
pub async fn assist(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(request): Json<CalculationRequest>,
) -> AppResult<Json<AppResponse<CalculationResult>>> {
    // Unknown products fail fast, before spending a model round trip
    find_product(&state, &request.form.product_type)?;
    let table = price_table_for(&state, &current.phone)?;
    let result = state.llm.calculate(&request, &table).await?;
    Ok(ok(result))
}

/// POST /api/chat - assistant conversation turn
pub async fn chat(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<AppResponse<ChatReply>>> {
    // Chat degrades politely on an empty table instead of failing the turn
    let table = match price_table_for(&state, &current.phone) {
        Ok(table) => table,
        Err(AppError::NoPriceTable(_)) => {
            return Ok(ok(ChatReply {
                response_type: ChatResponseType::Text,
                text_response:
                    "Narxlar jadvali hali to'ldirilmagan. Hisob-kitob qilish uchun avval sozlamalardan narxlar jadvalini kiriting."
                        .to_string(),
                calculation_results: None,
                suggested_actions: Some(vec![
                    "Narxlar jadvalini ochish".to_string(),
                    "Mahsulotlar ro'yxatini ko'rish".to_string(),
                ]),
            }));
        }
        Err(e) => return Err(e),
    };
    let products = state.store.products.read().clone();
    let reply = state
        .llm
        .chat(
            &request.history,
            &request.message,
            &table,
            &products,
            request.file.as_ref(),
        )
        .await?;
    Ok(ok(reply))
}
