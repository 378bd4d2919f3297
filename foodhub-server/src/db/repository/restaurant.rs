//! Restaurant Repository

use super::{RepoError, RepoResult};
use shared::models::{Restaurant, RestaurantCreate};
use sqlx::SqlitePool;

const RESTAURANT_SELECT: &str = "SELECT id, owner_id, name, address, opening_hours, is_active, created_at, updated_at FROM restaurant";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Restaurant>> {
    let sql = format!(
        "{} WHERE is_active = 1 ORDER BY created_at DESC",
        RESTAURANT_SELECT
    );
    let rows = sqlx::query_as::<_, Restaurant>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let sql = format!("{} WHERE id = ?", RESTAURANT_SELECT);
    let row = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_owner(pool: &SqlitePool, owner_id: i64) -> RepoResult<Vec<Restaurant>> {
    let sql = format!(
        "{} WHERE owner_id = ? ORDER BY created_at DESC",
        RESTAURANT_SELECT
    );
    let rows = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(owner_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: RestaurantCreate) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO restaurant (id, owner_id, name, address, opening_hours, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(data.owner_id)
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.opening_hours)
    .bind(data.is_active)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}
