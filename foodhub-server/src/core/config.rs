use crate::lifecycle::TransitionPolicy;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录（数据库、日志） |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | {WORK_DIR}/foodhub.db | SQLite 数据库文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | ALLOW_STATUS_SKIP | true | 是否允许跨步前进（如 CREATED→DELIVERING） |
/// | DEMO_SEED | false | 启动时载入演示数据 |
/// | MAIL_FROM | no-reply@foodhub.local | 通知邮件发件人 |
/// | SES_ENABLED | false | 启用 AWS SES 邮件发送 |
/// | SES_REGION | (AWS 默认) | SES 区域覆盖 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/foodhub HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 状态推进策略：true 允许任意向前跳步，false 只允许相邻一步
    pub allow_status_skip: bool,
    /// 启动时载入演示数据
    pub demo_seed: bool,
    /// 通知邮件发件人地址
    pub mail_from: String,
    /// 是否启用 AWS SES 发信（未启用时邮件只记日志）
    pub ses_enabled: bool,
    /// SES 区域覆盖（可选）
    pub ses_region: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{}/foodhub.db", work_dir.trim_end_matches('/')));
        Self {
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            allow_status_skip: std::env::var("ALLOW_STATUS_SKIP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            demo_seed: std::env::var("DEMO_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@foodhub.local".into()),
            ses_enabled: std::env::var("SES_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            ses_region: std::env::var("SES_REGION").ok(),
        }
    }

    /// 生效的状态推进策略
    pub fn transition_policy(&self) -> TransitionPolicy {
        if self.allow_status_skip {
            TransitionPolicy::AnyForward
        } else {
            TransitionPolicy::NextOnly
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
