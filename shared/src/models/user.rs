//! User Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// User entity
///
/// One table covers every role in the platform: customers place orders,
/// restaurant owners manage menus and order fulfilment, riders carry
/// deliveries, and staff operators assign them. `email` is optional — a user
/// without one simply receives no notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_staff: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub display_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
}
