//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{dish, restaurant, user};
use crate::orders::money;
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;
use shared::models::{Dish, DishCreate, Restaurant, RestaurantCreate};

#[derive(serde::Deserialize)]
pub struct ActorQuery {
    pub actor_id: i64,
}

/// GET /api/restaurants - 获取所有营业中的餐厅
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Restaurant>>> {
    let restaurants = restaurant::find_all(&state.pool).await?;
    Ok(Json(restaurants))
}

/// GET /api/restaurants/:id - 获取单个餐厅
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Restaurant>> {
    let found = restaurant::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::RestaurantNotFound,
                format!("Restaurant {id} not found"),
            )
        })?;
    Ok(Json(found))
}

/// POST /api/restaurants - 创建餐厅
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<Restaurant>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    user::find_by_id(&state.pool, payload.owner_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::UserNotFound,
                format!("User {} not found", payload.owner_id),
            )
        })?;
    let created = restaurant::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// GET /api/restaurants/:id/dishes - 餐厅菜单
pub async fn list_dishes(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Dish>>> {
    restaurant::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::RestaurantNotFound,
            format!("Restaurant {id} not found"),
        )
    })?;
    let dishes = dish::find_by_restaurant(&state.pool, id).await?;
    Ok(Json(dishes))
}

/// POST /api/restaurants/:id/dishes?actor_id= - 新增菜品（仅店主）
pub async fn create_dish(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(actor): Query<ActorQuery>,
    Json(payload): Json<DishCreate>,
) -> AppResult<Json<Dish>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    money::validate_price(payload.price)?;

    let rest = restaurant::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::RestaurantNotFound,
            format!("Restaurant {id} not found"),
        )
    })?;
    if rest.owner_id != actor.actor_id {
        return Err(AppError::forbidden(
            "Only the restaurant owner can manage its menu",
        ));
    }

    let created = dish::create(&state.pool, id, payload).await?;
    Ok(Json(created))
}
