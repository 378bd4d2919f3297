//! Unified error system for the FoodHub platform
//!
//! This module provides:
//! - [`ErrorCode`]: standardized numeric error codes for all error types
//! - [`AppError`]: rich error type with codes, messages, and details
//! - [`ApiResponse`]: unified API response format
//! - HTTP status mapping for every code
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors (45xx: delivery)
//! - 6xxx: Restaurant/menu errors
//! - 8xxx: User errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! // Default message for the code
//! let err = AppError::new(ErrorCode::DeliveryNotFound);
//!
//! // Custom message
//! let err = AppError::with_message(ErrorCode::OrderNotFound, "Order 12 not found");
//! assert_eq!(err.http_status().as_u16(), 404);
//!
//! // Lifecycle violations
//! let err = AppError::invalid_transition("DELIVERED", "PICKED_UP");
//! assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
//! ```

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
