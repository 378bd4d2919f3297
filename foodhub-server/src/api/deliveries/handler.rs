//! Delivery API Handlers
//!
//! 指派与待派队列仅限运营人员（is_staff）；状态更新仅限被指派的骑手。

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::{delivery, user};
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;
use shared::models::{Delivery, DeliveryAdvance, DeliveryAssign, Order, User};

#[derive(serde::Deserialize)]
pub struct RiderQuery {
    pub rider_id: i64,
}

#[derive(serde::Deserialize)]
pub struct ActorQuery {
    pub actor_id: i64,
}

/// Resolve an actor id and require the staff flag
async fn require_staff(state: &ServerState, actor_id: i64) -> AppResult<User> {
    let actor = user::find_by_id(&state.pool, actor_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::UserNotFound,
                format!("User {actor_id} not found"),
            )
        })?;
    if !actor.is_staff {
        return Err(AppError::with_message(
            ErrorCode::StaffRequired,
            "Delivery assignment requires a staff operator",
        ));
    }
    Ok(actor)
}

/// GET /api/deliveries/queue?actor_id= - 待指派订单队列（仅运营）
pub async fn queue(
    State(state): State<ServerState>,
    Query(actor): Query<ActorQuery>,
) -> AppResult<Json<Vec<Order>>> {
    require_staff(&state, actor.actor_id).await?;
    let orders = delivery::assignment_queue(&state.pool).await?;
    Ok(Json(orders))
}

/// POST /api/orders/:id/delivery/assign - 指派骑手（仅运营）
pub async fn assign(
    State(state): State<ServerState>,
    Path(order_id): Path<i64>,
    Json(payload): Json<DeliveryAssign>,
) -> AppResult<Json<Delivery>> {
    let actor = require_staff(&state, payload.actor_id).await?;
    let assigned = state
        .deliveries
        .assign(order_id, payload.rider_id, &actor)
        .await?;
    Ok(Json(assigned))
}

/// GET /api/deliveries?rider_id= - 骑手的配送列表
pub async fn list_for_rider(
    State(state): State<ServerState>,
    Query(query): Query<RiderQuery>,
) -> AppResult<Json<Vec<Delivery>>> {
    let deliveries = delivery::list_by_rider(&state.pool, query.rider_id).await?;
    Ok(Json(deliveries))
}

/// POST /api/deliveries/:id/advance - 推进配送状态（仅被指派骑手）
pub async fn advance(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DeliveryAdvance>,
) -> AppResult<Json<Delivery>> {
    let actor = user::find_by_id(&state.pool, payload.actor_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::UserNotFound,
                format!("User {} not found", payload.actor_id),
            )
        })?;

    let current = delivery::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::DeliveryNotFound,
            format!("Delivery {id} not found"),
        )
    })?;
    if current.rider_id != Some(actor.id) {
        return Err(AppError::with_message(
            ErrorCode::RiderNotAssigned,
            "Only the assigned rider can update this delivery",
        ));
    }

    let updated = state
        .deliveries
        .advance(id, payload.next_status, &actor)
        .await?;
    Ok(Json(updated))
}
