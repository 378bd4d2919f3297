//! Dish Repository
//!
//! Menu entries. Deletion is blocked while order items reference the dish —
//! order history must stay reconstructible even though items carry their own
//! name/price snapshot.

use super::{RepoError, RepoResult};
use shared::models::{Dish, DishCreate, DishUpdate};
use sqlx::SqlitePool;

const DISH_SELECT: &str = "SELECT id, restaurant_id, name, description, price, available, created_at, updated_at FROM dish";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Dish>> {
    let sql = format!("{} WHERE id = ?", DISH_SELECT);
    let row = sqlx::query_as::<_, Dish>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_restaurant(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<Dish>> {
    let sql = format!("{} WHERE restaurant_id = ? ORDER BY name", DISH_SELECT);
    let rows = sqlx::query_as::<_, Dish>(&sql)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch a batch of dishes by id (order creation resolves its lines here)
pub async fn find_many(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Dish>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("{} WHERE id IN ({})", DISH_SELECT, placeholders);
    let mut query = sqlx::query_as::<_, Dish>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, restaurant_id: i64, data: DishCreate) -> RepoResult<Dish> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO dish (id, restaurant_id, name, description, price, available, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.available)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dish".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DishUpdate) -> RepoResult<Dish> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE dish SET name = COALESCE(?1, name), description = COALESCE(?2, description), price = COALESCE(?3, price), available = COALESCE(?4, available), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.available)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Dish {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Dish {id} not found")))
}

/// Number of order items that reference a dish
pub async fn order_item_refs(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM order_item WHERE dish_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Delete a dish. Fails with [`RepoError::InUse`] while order items
/// reference it (protect-on-delete).
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let refs = order_item_refs(pool, id).await?;
    if refs > 0 {
        return Err(RepoError::InUse(format!(
            "Dish {id} is referenced by {refs} order item(s)"
        )));
    }
    let rows = sqlx::query("DELETE FROM dish WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
