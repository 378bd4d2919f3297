//! Delivery Model
//!
//! 配送与订单一一对应，由运营人员指派骑手时创建。
//! 状态只沿 ASSIGNED → PICKED_UP → DELIVERED 向前；CANCELLED 为终止态。
//! 每次指派和状态变更都会追加一条 DeliveryEvent（只增不改）。

use serde::{Deserialize, Serialize};

/// Delivery event types. Open-ended by design — stored as plain text.
pub const EVENT_ASSIGNED: &str = "ASSIGNED";
pub const EVENT_STATUS_CHANGE: &str = "STATUS_CHANGE";

/// Delivery status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Assigned,
    PickedUp,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Assigned => "ASSIGNED",
            DeliveryStatus::PickedUp => "PICKED_UP",
            DeliveryStatus::Delivered => "DELIVERED",
            DeliveryStatus::Cancelled => "CANCELLED",
        }
    }

    /// Human wording for notification subjects ("PICKED_UP" → "picked up")
    pub fn humanized(&self) -> String {
        self.as_str().replace('_', " ").to_lowercase()
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery entity (one-to-one with an order)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Delivery {
    pub id: i64,
    pub order_id: i64,
    /// Null until a rider is assigned (always set by the assign operation)
    pub rider_id: Option<i64>,
    pub status: DeliveryStatus,
    pub assigned_at: i64,
    pub updated_at: i64,
}

/// Delivery event entity — append-only audit trail row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DeliveryEvent {
    pub id: i64,
    pub delivery_id: i64,
    pub event_type: String,
    pub message: String,
    /// Null when the acting user was deleted afterwards
    pub actor_id: Option<i64>,
    pub created_at: i64,
}

/// Event view for timelines (status summary endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DeliveryEventView {
    pub created_at: i64,
    pub event_type: String,
    pub message: String,
}

/// Assign rider payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAssign {
    pub rider_id: i64,
    pub actor_id: i64,
}

/// Advance delivery status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAdvance {
    pub next_status: DeliveryStatus,
    pub actor_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanized_status() {
        assert_eq!(DeliveryStatus::PickedUp.humanized(), "picked up");
        assert_eq!(DeliveryStatus::Delivered.humanized(), "delivered");
        assert_eq!(DeliveryStatus::Assigned.humanized(), "assigned");
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&DeliveryStatus::PickedUp).unwrap();
        assert_eq!(json, r#""PICKED_UP""#);
        let parsed: DeliveryStatus = serde_json::from_str(r#""DELIVERED""#).unwrap();
        assert_eq!(parsed, DeliveryStatus::Delivered);
    }
}
