//! Delivery Repository (read paths)
//!
//! Assignment and status transitions go through `deliveries::engine`, which
//! also owns the event writes. This module only reads — the event log has no
//! update or delete path anywhere in the codebase.

use super::RepoResult;
use shared::models::{Delivery, DeliveryEvent, DeliveryEventView, Order};
use sqlx::SqlitePool;

pub(crate) const DELIVERY_SELECT: &str =
    "SELECT id, order_id, rider_id, status, assigned_at, updated_at FROM delivery";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Delivery>> {
    let sql = format!("{} WHERE id = ?", DELIVERY_SELECT);
    let row = sqlx::query_as::<_, Delivery>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_order(pool: &SqlitePool, order_id: i64) -> RepoResult<Option<Delivery>> {
    let sql = format!("{} WHERE order_id = ?", DELIVERY_SELECT);
    let row = sqlx::query_as::<_, Delivery>(&sql)
        .bind(order_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Deliveries assigned to a rider, most recently assigned first
pub async fn list_by_rider(pool: &SqlitePool, rider_id: i64) -> RepoResult<Vec<Delivery>> {
    let sql = format!(
        "{} WHERE rider_id = ? ORDER BY assigned_at DESC",
        DELIVERY_SELECT
    );
    let rows = sqlx::query_as::<_, Delivery>(&sql)
        .bind(rider_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Audit trail of a delivery, newest event first
pub async fn events_for_delivery(
    pool: &SqlitePool,
    delivery_id: i64,
) -> RepoResult<Vec<DeliveryEvent>> {
    let rows = sqlx::query_as::<_, DeliveryEvent>(
        "SELECT id, delivery_id, event_type, message, actor_id, created_at \
         FROM delivery_event WHERE delivery_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(delivery_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Timeline view of a delivery's events, newest first
pub async fn event_views(
    pool: &SqlitePool,
    delivery_id: i64,
) -> RepoResult<Vec<DeliveryEventView>> {
    let rows = sqlx::query_as::<_, DeliveryEventView>(
        "SELECT created_at, event_type, message \
         FROM delivery_event WHERE delivery_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(delivery_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Operator queue: orders still waiting for a rider (CREATED/PREPARING,
/// no delivery row yet), newest first
pub async fn assignment_queue(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, Order>(
        "SELECT o.id, o.customer_id, o.restaurant_id, o.status, o.created_at, o.updated_at \
         FROM orders o LEFT JOIN delivery d ON d.order_id = o.id \
         WHERE d.id IS NULL AND o.status IN ('CREATED', 'PREPARING') \
         ORDER BY o.created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
