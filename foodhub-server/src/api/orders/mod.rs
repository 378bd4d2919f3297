//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/advance", post(handler::advance))
        .route("/{id}/status", get(handler::status_summary))
        // POST /{id}/delivery/assign lives in the deliveries module
        .merge(super::deliveries::order_routes())
}
