//! 服务层 trait 定义
//!
//! 定义服务层的抽象接口，遵循六边形架构的端口适配器模式
//!
//! 路由函数只依赖这些 trait（通过 `Arc<dyn ...>` 保存在 [`AppState`](crate::AppState) 中），
//! 测试时可以替换成不依赖数据库的实现。

use database::{
    DatabaseResult, Project, ProjectComment, ProjectCommentCreate, ProjectCreate, ProjectDetail, ProjectFilter,
    ProjectSearchResult, ProjectUpdate, User, UserCreate, UserDetail, UserFilter, UserSearchResult, UserUpdate,
};

/// 项目服务 trait 定义
///
/// 定义了项目相关的业务逻辑接口，作为应用层的端口(Port)
///
/// 该 trait 作为业务逻辑的抽象接口，具体实现由 [`ProjectService`](crate::services::ProjectService) 提供
#[async_trait::async_trait]
pub trait ProjectServiceTrait: Send + Sync + 'static {
    /// 根据过滤参数搜索项目
    ///
    /// # 返回值
    /// 返回全部符合条件的项目和总数
    async fn search_by_filter_params(&self, filter: ProjectFilter) -> DatabaseResult<ProjectSearchResult>;

    /// 创建新项目
    ///
    /// # 参数
    /// - `project`: 项目创建信息
    ///
    /// # 返回值
    /// 返回创建的项目信息
    async fn create(&self, project: ProjectCreate) -> DatabaseResult<Project>;

    /// 根据 ID 获取项目信息和评论
    async fn get(&self, id: i64) -> DatabaseResult<ProjectDetail>;

    /// 整体覆盖项目信息
    ///
    /// # 参数
    /// - `id`: 项目 ID
    /// - `update`: 更新信息
    async fn update(&self, id: i64, update: ProjectUpdate) -> DatabaseResult<Project>;

    /// 删除项目
    async fn delete(&self, id: i64) -> DatabaseResult<()>;
}

/// 用户服务 trait 定义
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync + 'static {
    /// 根据过滤参数搜索用户
    async fn search_by_filter_params(&self, filter: UserFilter) -> DatabaseResult<UserSearchResult>;

    /// 创建新用户
    async fn create(&self, user: UserCreate) -> DatabaseResult<User>;

    /// 根据 ID 获取用户，包含被指派和负责的项目
    async fn get(&self, id: i64) -> DatabaseResult<UserDetail>;

    /// 整体覆盖用户信息
    async fn update(&self, id: i64, update: UserUpdate) -> DatabaseResult<User>;

    /// 删除用户
    async fn delete(&self, id: i64) -> DatabaseResult<()>;
}

/// 项目评论服务 trait 定义
#[async_trait::async_trait]
pub trait ProjectCommentServiceTrait: Send + Sync + 'static {
    /// 给已存在的项目新增评论
    async fn create(&self, comment: ProjectCommentCreate) -> DatabaseResult<ProjectComment>;
}
