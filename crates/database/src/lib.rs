//! 数据库操作模块
//!
//! 这个模块提供了数据库连接、会话、迁移、查询等功能

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;
pub mod session;

pub use connection::{initialize_database, Database, DatabasePool};
pub use error::DatabaseError;
pub use models::{
    Project, ProjectComment, ProjectCommentCreate, ProjectCreate, ProjectDetail, ProjectFilter, ProjectSearchResult,
    ProjectStatus, ProjectUpdate, StatusFilter, User, UserCreate, UserDetail, UserFilter, UserSearchResult,
    UserUpdate,
};
pub use repositories::{ProjectCommentRepository, ProjectRepository, Repository, UserRepository};
pub use session::Session;

/// 数据库操作结果类型
pub type DatabaseResult<T> = Result<T, DatabaseError>;
