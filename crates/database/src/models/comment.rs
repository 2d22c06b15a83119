//! 项目评论数据库模型

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// 项目评论
///
/// 每条评论只属于一个项目，项目删除时评论会被一并删除。
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProjectComment {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub project_id: i64,
    /// 发表评论的用户
    pub reporter: i64,
}

/// 项目评论创建参数
#[derive(Debug, Clone)]
pub struct ProjectCommentCreate {
    pub project_id: i64,
    pub description: String,
    pub reporter: i64,
}
