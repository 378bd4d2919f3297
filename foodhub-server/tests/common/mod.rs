//! Shared test fixtures: throwaway SQLite database, recording mail
//! transport, and a small cast of users around one restaurant.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

use foodhub_server::core::{Config, ServerState};
use foodhub_server::db::DbService;
use foodhub_server::notify::{MailError, Mailer, NotificationService};
use foodhub_server::{DeliveryEngine, OrderEngine, TransitionPolicy};
use shared::models::{
    Dish, DishCreate, OrderCreate, OrderDetail, OrderItemInput, Restaurant, RestaurantCreate,
    User, UserCreate,
};
use sqlx::SqlitePool;

/// One captured outbound email
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail transport that records instead of sending
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn outbox(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        _from: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Mail transport that always fails (for swallow-errors coverage)
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _: &str, _: &str, _: &str, _: &str) -> Result<(), MailError> {
        Err(MailError("smtp unreachable".into()))
    }
}

pub struct TestContext {
    pub pool: SqlitePool,
    pub mailer: Arc<RecordingMailer>,
    pub orders: OrderEngine,
    pub deliveries: DeliveryEngine,
    // keeps the database file alive for the test's duration
    _db_file: NamedTempFile,
}

impl TestContext {
    /// Engine pair with the same pool/outbox but a different policy
    pub fn engines_with_policy(&self, policy: TransitionPolicy) -> (OrderEngine, DeliveryEngine) {
        let notifier = Arc::new(NotificationService::new(
            self.mailer.clone(),
            "no-reply@foodhub.test",
        ));
        (
            OrderEngine::new(self.pool.clone(), notifier.clone(), policy),
            DeliveryEngine::new(self.pool.clone(), notifier, policy),
        )
    }

    /// A ServerState wired to this context's pool and outbox
    pub fn server_state(&self) -> ServerState {
        let notifier = Arc::new(NotificationService::new(
            self.mailer.clone(),
            "no-reply@foodhub.test",
        ));
        ServerState {
            config: test_config(),
            pool: self.pool.clone(),
            notifier,
            orders: self.orders.clone(),
            deliveries: self.deliveries.clone(),
        }
    }
}

fn test_config() -> Config {
    Config {
        work_dir: "./target/test-data".into(),
        http_port: 0,
        database_path: ":memory:".into(),
        environment: "test".into(),
        allow_status_skip: true,
        demo_seed: false,
        mail_from: "no-reply@foodhub.test".into(),
        ses_enabled: false,
        ses_region: None,
    }
}

/// Fresh database with migrations applied plus recording engines
pub async fn setup() -> TestContext {
    let db_file = NamedTempFile::new().expect("temp db file");
    let db = DbService::new(db_file.path().to_str().unwrap())
        .await
        .expect("open test database");
    let pool = db.pool;

    let mailer = Arc::new(RecordingMailer::default());
    let notifier = Arc::new(NotificationService::new(
        mailer.clone(),
        "no-reply@foodhub.test",
    ));
    let orders = OrderEngine::new(pool.clone(), notifier.clone(), TransitionPolicy::AnyForward);
    let deliveries =
        DeliveryEngine::new(pool.clone(), notifier, TransitionPolicy::AnyForward);

    TestContext {
        pool,
        mailer,
        orders,
        deliveries,
        _db_file: db_file,
    }
}

/// The standard cast: owner, customer (with email), rider, a second rider,
/// one staff operator, one non-staff bystander, a restaurant with two
/// dishes, and one open order (2× 10.00 + 1× 6.00)
pub struct Fixture {
    pub owner: User,
    pub customer: User,
    pub rider: User,
    pub second_rider: User,
    pub operator: User,
    pub other: User,
    pub restaurant: Restaurant,
    pub pasta: Dish,
    pub tiramisu: Dish,
    pub order: OrderDetail,
}

pub async fn fixture(ctx: &TestContext) -> Fixture {
    use foodhub_server::db::repository::{dish, restaurant, user};

    let mk_user = |username: &str, email: Option<&str>, is_staff: bool| UserCreate {
        username: username.to_string(),
        display_name: username.to_string(),
        email: email.map(str::to_string),
        phone: None,
        address: None,
        is_staff,
    };

    let owner = user::create(&ctx.pool, mk_user("owner", None, false))
        .await
        .unwrap();
    let customer = user::create(&ctx.pool, mk_user("cust", Some("cust@example.com"), false))
        .await
        .unwrap();
    let rider = user::create(&ctx.pool, mk_user("rider", None, false))
        .await
        .unwrap();
    let second_rider = user::create(&ctx.pool, mk_user("rider2", None, false))
        .await
        .unwrap();
    let operator = user::create(&ctx.pool, mk_user("operator", None, true))
        .await
        .unwrap();
    let other = user::create(&ctx.pool, mk_user("other", None, false))
        .await
        .unwrap();

    let restaurant = restaurant::create(
        &ctx.pool,
        RestaurantCreate {
            owner_id: owner.id,
            name: "R".into(),
            address: "A".into(),
            opening_hours: "09:00-18:00".into(),
            is_active: true,
        },
    )
    .await
    .unwrap();

    let pasta = dish::create(
        &ctx.pool,
        restaurant.id,
        DishCreate {
            name: "Pasta".into(),
            description: String::new(),
            price: 10.00,
            available: true,
        },
    )
    .await
    .unwrap();
    let tiramisu = dish::create(
        &ctx.pool,
        restaurant.id,
        DishCreate {
            name: "Tiramisù".into(),
            description: String::new(),
            price: 6.00,
            available: true,
        },
    )
    .await
    .unwrap();

    let order = ctx
        .orders
        .create(OrderCreate {
            customer_id: customer.id,
            items: vec![
                OrderItemInput {
                    dish_id: pasta.id,
                    quantity: 2,
                },
                OrderItemInput {
                    dish_id: tiramisu.id,
                    quantity: 1,
                },
            ],
        })
        .await
        .unwrap();

    Fixture {
        owner,
        customer,
        rider,
        second_rider,
        operator,
        other,
        restaurant,
        pasta,
        tiramisu,
        order,
    }
}
