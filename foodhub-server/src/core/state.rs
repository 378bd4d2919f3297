use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::{DbService, seed};
use crate::deliveries::DeliveryEngine;
use crate::notify::{Mailer, NoopMailer, NotificationService, SesMailer};
use crate::orders::OrderEngine;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是 FoodHub 服务的核心数据结构。
/// 使用 Arc/连接池实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | notifier | Arc<NotificationService> | 顾客通知服务 |
/// | orders | OrderEngine | 订单生命周期引擎 |
/// | deliveries | DeliveryEngine | 配送生命周期引擎 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 顾客通知服务
    pub notifier: Arc<NotificationService>,
    /// 订单生命周期引擎
    pub orders: OrderEngine,
    /// 配送生命周期引擎
    pub deliveries: DeliveryEngine,
}

impl ServerState {
    /// 初始化服务器状态：数据库、通知服务、生命周期引擎
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db = DbService::new(&config.database_path).await?;
        let pool = db.pool;

        if config.demo_seed {
            seed::load_demo_data(&pool).await?;
        }

        let mailer: Arc<dyn Mailer> = if config.ses_enabled {
            tracing::info!("Mail transport: AWS SES");
            Arc::new(SesMailer::from_env(config.ses_region.clone()).await)
        } else {
            tracing::info!("Mail transport: disabled (emails are logged and dropped)");
            Arc::new(NoopMailer)
        };
        let notifier = Arc::new(NotificationService::new(mailer, config.mail_from.clone()));

        let policy = config.transition_policy();
        let orders = OrderEngine::new(pool.clone(), notifier.clone(), policy);
        let deliveries = DeliveryEngine::new(pool.clone(), notifier.clone(), policy);

        Ok(Self {
            config: config.clone(),
            pool,
            notifier,
            orders,
            deliveries,
        })
    }
}
