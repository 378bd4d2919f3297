//! Shared types for the FoodHub platform
//!
//! Common code used by `foodhub-server` and external API consumers:
//!
//! - [`models`] - data models (users, restaurants, menu, orders, deliveries)
//! - [`error`] - unified error codes and API response envelope
//! - [`util`] - id generation and timestamp helpers
//!
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]` so
//! frontend consumers can depend on this crate without pulling in sqlx.

pub mod error;
pub mod models;
pub mod util;

// Re-export the error surface at the crate root
pub use error::{ApiResponse, AppError, AppResult, ErrorCode, InvalidErrorCode};
