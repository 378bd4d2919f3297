//! Delivery API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/deliveries", routes())
}

/// Routes mounted under `/api/orders` — assignment is addressed through the
/// order it belongs to (merged into the orders router)
pub(crate) fn order_routes() -> Router<ServerState> {
    Router::new().route("/{id}/delivery/assign", post(handler::assign))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_for_rider))
        .route("/queue", get(handler::queue))
        .route("/{id}/advance", post(handler::advance))
}
