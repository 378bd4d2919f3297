//! Order Repository (read paths)
//!
//! Order creation and status transitions go through `orders::engine`.

use super::RepoResult;
use crate::orders::money;
use shared::models::{Order, OrderDetail, OrderItem};
use sqlx::SqlitePool;

pub(crate) const ORDER_SELECT: &str =
    "SELECT id, customer_id, restaurant_id, status, created_at, updated_at FROM orders";

const ITEM_SELECT: &str =
    "SELECT id, order_id, dish_id, dish_name, unit_price, quantity FROM order_item";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{} WHERE id = ?", ORDER_SELECT);
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Orders placed by a customer, newest first
pub async fn list_by_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{} WHERE customer_id = ? ORDER BY created_at DESC",
        ORDER_SELECT
    );
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Orders for all restaurants owned by a user, newest first
pub async fn list_by_owner(pool: &SqlitePool, owner_id: i64) -> RepoResult<Vec<Order>> {
    let sql = "SELECT o.id, o.customer_id, o.restaurant_id, o.status, o.created_at, o.updated_at \
               FROM orders o JOIN restaurant r ON o.restaurant_id = r.id \
               WHERE r.owner_id = ? ORDER BY o.created_at DESC";
    let rows = sqlx::query_as::<_, Order>(sql)
        .bind(owner_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Snapshot items of an order, in insertion order
pub async fn items_for_order(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{} WHERE order_id = ? ORDER BY id", ITEM_SELECT);
    let rows = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Full order detail: items plus decimal-computed total
pub async fn detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let items = items_for_order(pool, id).await?;
    let total_amount = money::order_total(&items);
    Ok(Some(OrderDetail {
        order,
        items,
        total_amount,
    }))
}
