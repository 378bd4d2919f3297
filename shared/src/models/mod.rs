//! Data models
//!
//! Shared between foodhub-server and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake-generated).

pub mod delivery;
pub mod dish;
pub mod order;
pub mod restaurant;
pub mod user;

// Re-exports
pub use delivery::*;
pub use dish::*;
pub use order::*;
pub use restaurant::*;
pub use user::*;
