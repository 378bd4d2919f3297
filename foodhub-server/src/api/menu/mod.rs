//! Dish API 模块（菜品修改与删除）

mod handler;

use axum::{Router, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/dishes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/{id}", put(handler::update).delete(handler::delete))
}
