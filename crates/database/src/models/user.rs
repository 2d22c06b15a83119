//! 用户数据库模型

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// 用户信息结构体
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub fullname: String,
}

/// 用户详情
///
/// `projects_designated` 和 `projects_leader` 不是用户表上的列，
/// 而是通过查询引用了该用户的项目得到的项目ID列表。
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserDetail {
    #[sqlx(flatten)]
    pub user: User,
    pub projects_designated: Vec<i64>,
    pub projects_leader: Vec<i64>,
}

/// 用户搜索结果
#[derive(Debug, Clone)]
pub struct UserSearchResult {
    pub users: Vec<UserDetail>,
    pub count: i64,
}

/// 用户创建参数
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub fullname: String,
}

/// 用户更新参数
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub fullname: String,
}
