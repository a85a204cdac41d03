//! Order Model

use serde::{Deserialize, Serialize};

use crate::models::calculation::CalculationResult;
use crate::models::product::{FormState, Product};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Accepted,
    InProgress,
    Ready,
    Delivered,
    Cancelled,
}

/// One calculated item placed in the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub product: Product,
    pub request: FormState,
    pub result: CalculationResult,
}

/// Customer contact details captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    #[default]
    Pickup,
    Delivery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryInfo {
    pub method: DeliveryMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A flat surcharge applied at order level (e.g. design service)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderService {
    pub name: String,
    pub cost: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    /// Owner's phone number
    pub user: String,
    pub items: Vec<CartItem>,
    pub created_at: String,
    pub status: OrderStatus,
    pub subtotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub additional_services: Vec<OrderService>,
    pub total_cost: f64,
    pub customer: CustomerInfo,
    pub delivery: DeliveryInfo,
    pub payment_method: String,
}

/// Create order payload; totals are recomputed server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub items: Vec<CartItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    #[serde(default)]
    pub additional_services: Vec<OrderService>,
    pub customer: CustomerInfo,
    pub delivery: DeliveryInfo,
    pub payment_method: String,
}

/// Admin order status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}
