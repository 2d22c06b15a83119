//! 数据库模型模块
//!
//! 这里定义与数据库表对应的结构体和相关操作

pub mod comment;
pub mod filter;
pub mod project;
pub mod user;

// 重新导出具体的模型
pub use comment::{ProjectComment, ProjectCommentCreate};
pub use filter::{ProjectFilter, ProjectOrderField, SortDirection, StatusFilter, UserFilter, UserOrderField};
pub use project::{Project, ProjectCreate, ProjectDetail, ProjectSearchResult, ProjectStatus, ProjectUpdate, UnknownStatus};
pub use user::{User, UserCreate, UserDetail, UserSearchResult, UserUpdate};
