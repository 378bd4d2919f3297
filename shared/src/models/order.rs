//! Order Model
//!
//! 订单状态只沿固定序列向前推进：
//! CREATED → PAID → PREPARING → DELIVERING → COMPLETED
//! CANCELLED 为终止态（当前没有任何操作会进入该状态）。

use super::delivery::{DeliveryEventView, DeliveryStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Paid,
    Preparing,
    Delivering,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Paid => "PAID",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Delivering => "DELIVERING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order item entity — immutable name/price snapshot taken at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub dish_id: i64,
    /// snapshot of the dish name
    pub dish_name: String,
    /// snapshot of the dish price
    pub unit_price: f64,
    pub quantity: i32,
}

/// One line of an order-creation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemInput {
    pub dish_id: i64,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Create order payload (checkout)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    pub customer_id: i64,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub items: Vec<OrderItemInput>,
}

/// Advance order status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAdvance {
    pub next_status: OrderStatus,
    pub actor_id: i64,
}

/// Full order detail (items + computed total)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
}

/// Machine-readable status summary for polling clients
///
/// 对外唯一的结构化跟踪接口：订单状态 + 配送状态 + 事件时间线（最新在前）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusSummary {
    pub order_id: i64,
    pub order_status: OrderStatus,
    pub delivery_status: Option<DeliveryStatus>,
    pub rider_id: Option<i64>,
    pub events: Vec<DeliveryEventView>,
}
