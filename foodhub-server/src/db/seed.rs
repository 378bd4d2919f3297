//! Demo data loader
//!
//! Seeds a small demo cast (owner, customer, rider, operator, one restaurant
//! with a menu, one open order) for local development. Idempotent: does
//! nothing when users already exist. Enabled with `DEMO_SEED=true`.

use crate::db::repository::{dish, restaurant, user};
use shared::models::{DishCreate, OrderStatus, RestaurantCreate, UserCreate};
use shared::util::{now_millis, snowflake_id};
use shared::AppResult;
use sqlx::SqlitePool;

pub async fn load_demo_data(pool: &SqlitePool) -> AppResult<()> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        tracing::info!("Demo seed skipped, users already present");
        return Ok(());
    }

    let owner = user::create(
        pool,
        UserCreate {
            username: "owner".into(),
            display_name: "Olive Owner".into(),
            email: Some("owner@example.com".into()),
            phone: None,
            address: None,
            is_staff: false,
        },
    )
    .await?;
    let customer = user::create(
        pool,
        UserCreate {
            username: "cust".into(),
            display_name: "Carla Customer".into(),
            email: Some("cust@example.com".into()),
            phone: Some("555-0100".into()),
            address: Some("1 Demo Street".into()),
            is_staff: false,
        },
    )
    .await?;
    user::create(
        pool,
        UserCreate {
            username: "rider".into(),
            display_name: "Remo Rider".into(),
            email: None,
            phone: Some("555-0101".into()),
            address: None,
            is_staff: false,
        },
    )
    .await?;
    user::create(
        pool,
        UserCreate {
            username: "operator".into(),
            display_name: "Opal Operator".into(),
            email: None,
            phone: None,
            address: None,
            is_staff: true,
        },
    )
    .await?;

    let rest = restaurant::create(
        pool,
        RestaurantCreate {
            owner_id: owner.id,
            name: "Trattoria Demo".into(),
            address: "42 Food Court".into(),
            opening_hours: "09:00-18:00".into(),
            is_active: true,
        },
    )
    .await?;

    let pasta = dish::create(
        pool,
        rest.id,
        DishCreate {
            name: "Pasta".into(),
            description: "House specialty".into(),
            price: 10.00,
            available: true,
        },
    )
    .await?;
    let tiramisu = dish::create(
        pool,
        rest.id,
        DishCreate {
            name: "Tiramisù".into(),
            description: String::new(),
            price: 6.00,
            available: true,
        },
    )
    .await?;
    dish::create(
        pool,
        rest.id,
        DishCreate {
            name: "Seasonal special".into(),
            description: "Ask the kitchen".into(),
            price: 12.50,
            available: false,
        },
    )
    .await?;

    // one open order with snapshot items: 2× Pasta + 1× Tiramisù = 26.00
    let now = now_millis();
    let order_id = snowflake_id();
    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO orders (id, customer_id, restaurant_id, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(order_id)
    .bind(customer.id)
    .bind(rest.id)
    .bind(OrderStatus::Created)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    for (d, qty) in [(&pasta, 2), (&tiramisu, 1)] {
        sqlx::query(
            "INSERT INTO order_item (id, order_id, dish_id, dish_name, unit_price, quantity) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(snowflake_id())
        .bind(order_id)
        .bind(d.id)
        .bind(&d.name)
        .bind(d.price)
        .bind(qty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!("Demo data loaded (4 users, 1 restaurant, 3 dishes, 1 order)");
    Ok(())
}
