//! 数据库仓库 trait 定义
//!
//! 这里定义了各种数据库仓库的抽象接口
//!
//! ## Repository 设计模式 🎯
//!
//! 仓库本身不持有连接池，而是借用一个会话中的连接：
//!
//! ```rust,ignore
//! pub struct XxxRepository<'c> {
//!     conn: &'c mut PgConnection,
//! }
//! ```
//!
//! ### 为什么借用连接 📚
//!
//! #### 显式会话 🔄
//! - **作用**：所有读写都发生在调用方开启的 [`Session`](crate::Session) 事务中
//! - **必要性**：服务层需要在失败时整体回滚，多个仓库的操作必须共用同一个事务
//! - **场景**：创建项目前先校验负责人是否存在，再插入项目，两步在同一个事务里完成
//!
//! #### 生命周期 `'c` ⏰
//! - **作用**：仓库的生命周期不能超过它借用的会话
//! - **必要性**：编译器保证不会在事务提交或回滚之后继续使用连接
//!
//! ### 实际应用场景 💡
//!
//! ```rust,ignore
//! let mut session = database.session().await?;
//! let result = ProjectRepository::new(session.conn()).create(&create).await;
//! let project = session.finish(result).await?;
//! ```
//!
//! ### 约定 ✅
//!
//! 1. **异步优先**：所有数据库操作方法都是异步的
//! 2. **错误处理**：使用统一的 `DatabaseResult<T>` 类型进行错误处理
//! 3. **不存在即错误**：更新、删除不存在的记录返回 [`DatabaseError::NotFound`](crate::DatabaseError::NotFound)，
//!    不会静默成功

use crate::DatabaseResult;

/// 基础仓库 trait，提供单表的增删改查
#[async_trait::async_trait]
pub trait Repository {
    /// 创建参数
    type Create: Send + Sync;

    /// 更新参数（整体覆盖）
    type Update: Send + Sync;

    /// 数据库实体
    type Entity: Send;

    /// 创建新记录，返回数据库生成的完整记录
    async fn create(&mut self, create: &Self::Create) -> DatabaseResult<Self::Entity>;

    /// 根据 ID 获取记录，不存在时返回 `None`
    async fn get_by_id(&mut self, id: i64) -> DatabaseResult<Option<Self::Entity>>;

    /// 覆盖所有可修改字段，并刷新 `updated_at`
    async fn update(&mut self, id: i64, update: &Self::Update) -> DatabaseResult<Self::Entity>;

    /// 删除记录，返回被删除的记录
    async fn delete(&mut self, id: i64) -> DatabaseResult<Self::Entity>;
}
