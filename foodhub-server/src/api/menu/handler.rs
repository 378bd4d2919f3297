//! Dish API Handlers
//!
//! 菜品的改/删需要 `actor_id` 查询参数，并且必须是所属餐厅的店主。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{dish, restaurant};
use crate::orders::money;
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;
use shared::models::{Dish, DishUpdate};

#[derive(serde::Deserialize)]
pub struct ActorQuery {
    pub actor_id: i64,
}

/// Load a dish and verify the actor owns its restaurant
async fn owned_dish(state: &ServerState, dish_id: i64, actor_id: i64) -> AppResult<Dish> {
    let found = dish::find_by_id(&state.pool, dish_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::DishNotFound, format!("Dish {dish_id} not found"))
        })?;
    let rest = restaurant::find_by_id(&state.pool, found.restaurant_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::RestaurantNotFound,
                format!("Restaurant {} not found", found.restaurant_id),
            )
        })?;
    if rest.owner_id != actor_id {
        return Err(AppError::forbidden(
            "Only the restaurant owner can manage its menu",
        ));
    }
    Ok(found)
}

/// PUT /api/dishes/:id?actor_id= - 更新菜品（仅店主）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(actor): Query<ActorQuery>,
    Json(payload): Json<DishUpdate>,
) -> AppResult<Json<Dish>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    if let Some(price) = payload.price {
        money::validate_price(price)?;
    }
    owned_dish(&state, id, actor.actor_id).await?;
    let updated = dish::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/dishes/:id?actor_id= - 删除菜品（仅店主；被订单引用时拒绝）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(actor): Query<ActorQuery>,
) -> AppResult<Json<bool>> {
    owned_dish(&state, id, actor.actor_id).await?;
    let deleted = dish::delete(&state.pool, id).await?;
    Ok(Json(deleted))
}
