use crate::session::Session;
use crate::{DatabaseError, DatabaseResult};
use shared_lib::AppConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, Pool, Postgres};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 数据库连接池
pub type DatabasePool = Pool<Postgres>;

/// 数据库会话管理器
///
/// 内部只持有连接池，`clone` 的代价很低，可以安全地在多个请求之间共享。
/// 每次调用 [`Database::session`] 都会得到一个新的事务型会话。
#[derive(Debug, Clone)]
pub struct Database {
    pool: DatabasePool,
}

impl Database {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// 开启一个新的事务型会话
    ///
    /// 服务器拒绝连接时返回 [`DatabaseError::Unreachable`]，不做任何重试。
    pub async fn session(&self) -> DatabaseResult<Session> {
        let tx = self.pool.begin().await.map_err(DatabaseError::from_connect)?;
        Ok(Session::new(tx))
    }
}

/// 创建数据库连接池并执行迁移（一站式函数）
///
/// 1. 创建连接池，每个新连接都会执行 `SET search_path` 切换到配置的schema
/// 2. schema不存在时自动创建
/// 3. 执行迁移，确保 `user` / `project` / `project_comments` 表存在
pub async fn initialize_database(config: Arc<AppConfig>) -> DatabaseResult<Database> {
    // schema名称在加载配置时已经校验过，只包含字母、数字和下划线
    let schema = config.database_schema.clone();
    let search_path = format!(r#"SET search_path TO "{schema}""#);

    // 注意：pool已经是一个智能指针了，所以可以使用.clone()安全跨线程使用
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(3))
        // 1小时空闲则释放
        .idle_timeout(Duration::from_secs(3600))
        // 6小时强制释放，避免长时间链接导致数据库问题
        .max_lifetime(Duration::from_secs(3600 * 6))
        .test_before_acquire(true)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                conn.execute(search_path.as_str()).await?;
                Ok(())
            })
        })
        .connect(&config.postgresql_conn_str)
        .await
        .map_err(DatabaseError::from_connect)?;

    info!("🗄️ 数据库连接池创建成功");

    pool.execute(format!(r#"CREATE SCHEMA IF NOT EXISTS "{schema}""#).as_str())
        .await
        .map_err(|e| DatabaseError::migration(format!("创建schema {schema} 失败: {e}")))?;

    // 执行数据库迁移
    info!("🔄 开始执行数据库迁移...");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::migration(format!("数据库迁移失败: {e}")))?;

    info!("✅ 数据库迁移完成，当前schema: {schema}");

    Ok(Database::new(pool))
}
