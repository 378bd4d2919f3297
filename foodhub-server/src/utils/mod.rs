//! 工具模块
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResult`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - 日志初始化

pub mod logger;

pub use logger::{init_logger, init_logger_with_file};

// Re-export error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
