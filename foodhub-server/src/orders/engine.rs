//! Order lifecycle engine
//!
//! 订单状态推进的唯一写入口。`advance` 在单个事务内完成
//! 读取 → 校验 → 条件更新（带状态守卫），并发请求只有一个能成功；
//! 提交后再尽力发送顾客通知。

use crate::db::repository::{order, user};
use crate::lifecycle::{ORDER_FLOW, TransitionPolicy};
use crate::notify::NotificationService;
use crate::orders::money;
use shared::models::{Order, OrderCreate, OrderDetail, OrderItem, OrderStatus, User};
use shared::util::{now_millis, snowflake_id};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct OrderEngine {
    pool: SqlitePool,
    notifier: Arc<NotificationService>,
    policy: TransitionPolicy,
}

impl OrderEngine {
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

    /// Create an order with snapshot items (checkout)
    ///
    /// Every line must reference an existing, available dish, and all dishes
    /// must belong to a single restaurant. Name and price are copied onto the
    /// items so later menu edits never rewrite order history.
    pub async fn create(&self, req: OrderCreate) -> AppResult<OrderDetail> {
        req.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let customer = user::find_by_id(&self.pool, req.customer_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::UserNotFound,
                    format!("User {} not found", req.customer_id),
                )
            })?;

        if req.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        for item in &req.items {
            money::validate_quantity(item.quantity)?;
        }

        let dish_ids: Vec<i64> = req.items.iter().map(|i| i.dish_id).collect();
        let dishes = crate::db::repository::dish::find_many(&self.pool, &dish_ids).await?;

        let mut restaurant_ids: Vec<i64> = Vec::new();
        let mut lines: Vec<(i64, String, f64, i32)> = Vec::with_capacity(req.items.len());
        for item in &req.items {
            let dish = dishes
                .iter()
                .find(|d| d.id == item.dish_id)
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::DishNotFound,
                        format!("Dish {} not found", item.dish_id),
                    )
                })?;
            if !dish.available {
                return Err(AppError::with_message(
                    ErrorCode::DishUnavailable,
                    format!("Dish {} is not available", dish.name),
                ));
            }
            if !restaurant_ids.contains(&dish.restaurant_id) {
                restaurant_ids.push(dish.restaurant_id);
            }
            lines.push((dish.id, dish.name.clone(), dish.price, item.quantity));
        }
        // 一张订单只能属于一家餐厅
        if restaurant_ids.len() != 1 {
            return Err(AppError::new(ErrorCode::OrderMixedRestaurants));
        }
        let restaurant_id = restaurant_ids[0];

        let now = now_millis();
        let order_id = snowflake_id();
        let mut items = Vec::with_capacity(lines.len());

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO orders (id, customer_id, restaurant_id, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        )
        .bind(order_id)
        .bind(customer.id)
        .bind(restaurant_id)
        .bind(OrderStatus::Created)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for (dish_id, dish_name, unit_price, quantity) in lines {
            let item = OrderItem {
                id: snowflake_id(),
                order_id,
                dish_id,
                dish_name,
                unit_price,
                quantity,
            };
            sqlx::query(
                "INSERT INTO order_item (id, order_id, dish_id, dish_name, unit_price, quantity) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(item.id)
            .bind(item.order_id)
            .bind(item.dish_id)
            .bind(&item.dish_name)
            .bind(item.unit_price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
            items.push(item);
        }
        tx.commit().await?;

        tracing::info!(order_id, customer_id = customer.id, restaurant_id, "Order created");

        let total_amount = money::order_total(&items);
        Ok(OrderDetail {
            order: Order {
                id: order_id,
                customer_id: customer.id,
                restaurant_id,
                status: OrderStatus::Created,
                created_at: now,
                updated_at: now,
            },
            items,
            total_amount,
        })
    }

    /// Advance an order to a strictly-forward status
    ///
    /// Authorization (only the owner of the order's restaurant) is the
    /// caller's responsibility; `actor` is recorded for tracing only.
    pub async fn advance(
        &self,
        order_id: i64,
        next_status: OrderStatus,
        actor: &User,
    ) -> AppResult<Order> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE id = ?", order::ORDER_SELECT);
        let current: Option<Order> = sqlx::query_as(&sql)
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?;
        let current = current.ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {order_id} not found"))
        })?;

        let next = ORDER_FLOW.advance(current.status, next_status, self.policy)?;

        let now = now_millis();
        // status guard: a concurrent transition that committed first makes
        // this update match zero rows, and the whole call fails cleanly
        let result = sqlx::query(
            "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
        )
        .bind(next)
        .bind(now)
        .bind(order_id)
        .bind(current.status)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::invalid_transition(current.status, next));
        }
        tx.commit().await?;

        tracing::info!(
            order_id,
            from = %current.status,
            to = %next,
            actor_id = actor.id,
            "Order status advanced"
        );

        let updated = Order {
            status: next,
            updated_at: now,
            ..current
        };

        // best-effort: committed first, notified after
        match user::find_by_id(&self.pool, updated.customer_id).await {
            Ok(Some(customer)) => {
                self.notifier.order_status_changed(&updated, &customer).await;
            }
            Ok(None) => {
                tracing::warn!(order_id, "Order customer no longer exists, skipping notification");
            }
            Err(e) => {
                tracing::warn!(order_id, error = %e, "Failed to load customer for notification");
            }
        }

        Ok(updated)
    }
}
