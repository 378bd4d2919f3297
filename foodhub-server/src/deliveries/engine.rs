//! Delivery lifecycle engine
//!
//! 配送的两个写操作：
//! - `assign`：幂等地为订单创建/复用配送记录，指派骑手并重置为 ASSIGNED，
//!   同一事务内追加 ASSIGNED 事件（不通知顾客）。
//! - `advance`：状态只向前推进，带状态守卫的条件更新与 STATUS_CHANGE
//!   事件在同一事务内提交；提交后尽力通知顾客。
//!
//! 校验失败时不产生任何写入 — 没有状态变化、没有事件、没有邮件。

use crate::db::repository::{delivery, order, user};
use crate::lifecycle::{DELIVERY_FLOW, TransitionPolicy};
use crate::notify::NotificationService;
use shared::models::{
    Delivery, DeliveryStatus, EVENT_ASSIGNED, EVENT_STATUS_CHANGE, User,
};
use shared::util::{now_millis, snowflake_id};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;

#[derive(Clone)]
pub struct DeliveryEngine {
    pool: SqlitePool,
    notifier: Arc<NotificationService>,
    policy: TransitionPolicy,
}

impl DeliveryEngine {
    pub fn new(
        pool: SqlitePool,
        notifier: Arc<NotificationService>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            pool,
            notifier,
            policy,
        }
    }

    /// Assign a rider to an order's delivery, creating the delivery on first
    /// call. Repeated calls reassign: one delivery row per order, rider
    /// overwritten, status reset to ASSIGNED, one more ASSIGNED event.
    pub async fn assign(&self, order_id: i64, rider_id: i64, actor: &User) -> AppResult<Delivery> {
        let order = order::find_by_id(&self.pool, order_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::OrderNotFound,
                    format!("Order {order_id} not found"),
                )
            })?;
        let rider = user::find_by_id(&self.pool, rider_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::UserNotFound,
                    format!("User {rider_id} not found"),
                )
            })?;

        let now = now_millis();
        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE order_id = ?", delivery::DELIVERY_SELECT);
        let existing: Option<Delivery> = sqlx::query_as(&sql)
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?;

        let delivery = match existing {
            Some(current) => {
                sqlx::query(
                    "UPDATE delivery SET rider_id = ?1, status = ?2, updated_at = ?3 WHERE id = ?4",
                )
                .bind(rider.id)
                .bind(DeliveryStatus::Assigned)
                .bind(now)
                .bind(current.id)
                .execute(&mut *tx)
                .await?;
                Delivery {
                    rider_id: Some(rider.id),
                    status: DeliveryStatus::Assigned,
                    updated_at: now,
                    ..current
                }
            }
            None => {
                let id = snowflake_id();
                sqlx::query(
                    "INSERT INTO delivery (id, order_id, rider_id, status, assigned_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                )
                .bind(id)
                .bind(order_id)
                .bind(rider.id)
                .bind(DeliveryStatus::Assigned)
                .bind(now)
                .execute(&mut *tx)
                .await?;
                Delivery {
                    id,
                    order_id,
                    rider_id: Some(rider.id),
                    status: DeliveryStatus::Assigned,
                    assigned_at: now,
                    updated_at: now,
                }
            }
        };

        let message = format!("Rider {} assigned to order {}", rider.username, order.id);
        append_event(&mut tx, delivery.id, EVENT_ASSIGNED, &message, Some(actor.id), now).await?;

        tx.commit().await?;

        tracing::info!(
            order_id,
            delivery_id = delivery.id,
            rider_id = rider.id,
            actor_id = actor.id,
            "Rider assigned"
        );

        // assignment itself does not notify the customer
        Ok(delivery)
    }

    /// Advance a delivery to a strictly-forward status
    ///
    /// Authorization (only the assigned rider) is the caller's
    /// responsibility; `actor` is recorded on the audit event.
    pub async fn advance(
        &self,
        delivery_id: i64,
        next_status: DeliveryStatus,
        actor: &User,
    ) -> AppResult<Delivery> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE id = ?", delivery::DELIVERY_SELECT);
        let current: Option<Delivery> = sqlx::query_as(&sql)
            .bind(delivery_id)
            .fetch_optional(&mut *tx)
            .await?;
        let current = current.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::DeliveryNotFound,
                format!("Delivery {delivery_id} not found"),
            )
        })?;

        let next = DELIVERY_FLOW.advance(current.status, next_status, self.policy)?;

        let now = now_millis();
        // status guard, same shape as the order engine: the second of two
        // racing transitions matches zero rows and fails without writing
        let result = sqlx::query(
            "UPDATE delivery SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
        )
        .bind(next)
        .bind(now)
        .bind(delivery_id)
        .bind(current.status)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::invalid_transition(current.status, next));
        }

        // the audit event commits or rolls back together with the status
        let message = format!("Order #{} delivery status changed to {}", current.order_id, next);
        append_event(
            &mut tx,
            delivery_id,
            EVENT_STATUS_CHANGE,
            &message,
            Some(actor.id),
            now,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            delivery_id,
            order_id = current.order_id,
            from = %current.status,
            to = %next,
            actor_id = actor.id,
            "Delivery status advanced"
        );

        let updated = Delivery {
            status: next,
            updated_at: now,
            ..current
        };

        self.notify_customer(&updated).await;

        Ok(updated)
    }

    /// Best-effort customer notification for a committed transition
    async fn notify_customer(&self, delivery: &Delivery) {
        let order = match order::find_by_id(&self.pool, delivery.order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                tracing::warn!(
                    delivery_id = delivery.id,
                    "Delivery order no longer exists, skipping notification"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(delivery_id = delivery.id, error = %e, "Failed to load order for notification");
                return;
            }
        };
        match user::find_by_id(&self.pool, order.customer_id).await {
            Ok(Some(customer)) => {
                self.notifier
                    .delivery_status_changed(delivery, &order, &customer)
                    .await;
            }
            Ok(None) => {
                tracing::warn!(
                    delivery_id = delivery.id,
                    "Order customer no longer exists, skipping notification"
                );
            }
            Err(e) => {
                tracing::warn!(delivery_id = delivery.id, error = %e, "Failed to load customer for notification");
            }
        }
    }
}

/// Append one audit event inside the caller's transaction
async fn append_event(
    tx: &mut Transaction<'_, Sqlite>,
    delivery_id: i64,
    event_type: &str,
    message: &str,
    actor_id: Option<i64>,
    now: i64,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO delivery_event (id, delivery_id, event_type, message, actor_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(snowflake_id())
    .bind(delivery_id)
    .bind(event_type)
    .bind(message)
    .bind(actor_id)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
