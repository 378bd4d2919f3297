//! Order API Handlers
//!
//! 推进订单状态只允许订单所属餐厅的店主；状态跟踪接口只对下单顾客可见
//! （非本人一律 404，不暴露订单是否存在）。

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::{delivery, order, restaurant, user};
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;
use shared::models::{
    Order, OrderAdvance, OrderCreate, OrderDetail, OrderStatusSummary,
};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub customer_id: Option<i64>,
    pub owner_id: Option<i64>,
}

#[derive(serde::Deserialize)]
pub struct TrackingQuery {
    pub customer_id: i64,
}

/// GET /api/orders?customer_id=|owner_id= - 订单列表（顾客视角或店主视角）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = match (query.customer_id, query.owner_id) {
        (Some(customer_id), None) => order::list_by_customer(&state.pool, customer_id).await?,
        (None, Some(owner_id)) => order::list_by_owner(&state.pool, owner_id).await?,
        _ => {
            return Err(AppError::invalid(
                "Provide exactly one of customer_id or owner_id",
            ));
        }
    };
    Ok(Json(orders))
}

/// GET /api/orders/:id - 订单详情（快照行 + 精确合计）
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::detail(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
    })?;
    Ok(Json(detail))
}

/// POST /api/orders - 下单（生成快照行）
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state.orders.create(payload).await?;
    Ok(Json(detail))
}

/// POST /api/orders/:id/advance - 推进订单状态（仅店主）
pub async fn advance(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderAdvance>,
) -> AppResult<Json<Order>> {
    let actor = user::find_by_id(&state.pool, payload.actor_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::UserNotFound,
                format!("User {} not found", payload.actor_id),
            )
        })?;

    let current = order::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
    })?;
    let rest = restaurant::find_by_id(&state.pool, current.restaurant_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::RestaurantNotFound,
                format!("Restaurant {} not found", current.restaurant_id),
            )
        })?;
    if rest.owner_id != actor.id {
        return Err(AppError::forbidden(
            "Only the restaurant owner can advance this order",
        ));
    }

    let updated = state.orders.advance(id, payload.next_status, &actor).await?;
    Ok(Json(updated))
}

/// GET /api/orders/:id/status?customer_id= - 状态跟踪（轮询接口，仅下单顾客）
pub async fn status_summary(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<TrackingQuery>,
) -> AppResult<Json<OrderStatusSummary>> {
    let not_found = || {
        AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
    };
    let current = order::find_by_id(&state.pool, id).await?.ok_or_else(not_found)?;
    // 非本人按不存在处理
    if current.customer_id != query.customer_id {
        return Err(not_found());
    }

    let delivery_row = delivery::find_by_order(&state.pool, id).await?;
    let events = match &delivery_row {
        Some(d) => delivery::event_views(&state.pool, d.id).await?,
        None => Vec::new(),
    };

    Ok(Json(OrderStatusSummary {
        order_id: current.id,
        order_status: current.status,
        delivery_status: delivery_row.as_ref().map(|d| d.status),
        rider_id: delivery_row.as_ref().and_then(|d| d.rider_id),
        events,
    }))
}
