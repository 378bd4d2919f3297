//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`users`] - 用户管理接口
//! - [`restaurants`] - 餐厅管理接口
//! - [`menu`] - 菜品管理接口
//! - [`orders`] - 订单接口（下单、推进、状态跟踪）
//! - [`deliveries`] - 配送接口（指派、骑手状态更新）
//!
//! 所有写操作在请求体中显式携带 `actor_id` — 引擎不读取任何隐式的
//! 请求上下文，调用方负责权限判断。

pub mod deliveries;
pub mod health;
pub mod menu;
pub mod orders;
pub mod restaurants;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
