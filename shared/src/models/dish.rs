//! Dish Model (menu entries)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dish entity
///
/// Menu prices are two-decimal money values. Order items keep their own
/// name/price snapshot, so editing a dish never rewrites order history;
/// deleting one is still blocked while order items reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Dish {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create dish payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DishCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.01))]
    pub price: f64,
    #[serde(default = "default_true")]
    pub available: bool,
}

/// Update dish payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DishUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.01))]
    pub price: Option<f64>,
    pub available: Option<bool>,
}

fn default_true() -> bool {
    true
}
