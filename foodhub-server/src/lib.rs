//! FoodHub Server - 外卖点餐与配送协调服务
//!
//! # 架构概述
//!
//! 本模块是 FoodHub 后端的主入口，提供以下核心功能：
//!
//! - **生命周期引擎** (`orders`, `deliveries`): 订单/配送状态只向前推进，
//!   每次配送变更在同一事务内落一条审计事件
//! - **数据库** (`db`): SQLite (WAL) + sqlx 迁移与仓储层
//! - **通知** (`notify`): 状态变更后的尽力而为顾客邮件（AWS SES）
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! foodhub-server/src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── lifecycle.rs   # 前向状态序列校验
//! ├── orders/        # 订单引擎 + 金额计算
//! ├── deliveries/    # 配送引擎 + 审计事件
//! ├── notify/        # 邮件通知
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层（连接池、仓储、演示数据）
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod deliveries;
pub mod lifecycle;
pub mod notify;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use crate::deliveries::DeliveryEngine;
pub use crate::lifecycle::{DELIVERY_FLOW, ORDER_FLOW, StatusFlow, TransitionPolicy};
pub use crate::notify::{Mailer, NoopMailer, NotificationService};
pub use crate::orders::OrderEngine;
pub use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), None);
    Ok(())
}
