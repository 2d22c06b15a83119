//! 项目数据库模型
//!
//! 定义项目相关的数据库模型结构体

use crate::models::comment::ProjectComment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 项目状态
///
/// 状态只是一个普通属性，不同状态之间可以任意切换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Analysis,
    Development,
    Testing,
    Finished,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Analysis,
        ProjectStatus::Development,
        ProjectStatus::Testing,
        ProjectStatus::Finished,
    ];

    /// 数据库中保存的字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Analysis => "analysis",
            ProjectStatus::Development => "development",
            ProjectStatus::Testing => "testing",
            ProjectStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 无法识别的项目状态
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("未知的项目状态: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 项目信息结构体
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Project {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub description: String,
    pub title: String,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    /// 被指派的用户
    pub designated: Option<i64>,
    /// 项目负责人
    pub leader: Option<i64>,
}

/// 项目详情，包含按时间倒序排列的评论
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    pub project: Project,
    pub comments: Vec<ProjectComment>,
}

/// 项目搜索结果
#[derive(Debug, Clone)]
pub struct ProjectSearchResult {
    pub projects: Vec<Project>,
    pub count: i64,
}

/// 项目创建参数
#[derive(Debug, Clone)]
pub struct ProjectCreate {
    pub deadline: Option<DateTime<Utc>>,
    pub description: String,
    pub title: String,
    pub status: ProjectStatus,
    pub designated: Option<i64>,
    pub leader: Option<i64>,
}

/// 项目更新参数
///
/// 更新是整体覆盖：所有可修改字段都会被写入，`None` 会把对应列置空。
#[derive(Debug, Clone)]
pub struct ProjectUpdate {
    pub deadline: Option<DateTime<Utc>>,
    pub description: String,
    pub title: String,
    pub status: ProjectStatus,
    pub designated: Option<i64>,
    pub leader: Option<i64>,
}

impl ProjectCreate {
    /// 引用到的用户ID（指派人、负责人）
    pub fn referenced_users(&self) -> impl Iterator<Item = i64> {
        self.designated.into_iter().chain(self.leader)
    }
}

impl ProjectUpdate {
    /// 引用到的用户ID（指派人、负责人）
    pub fn referenced_users(&self) -> impl Iterator<Item = i64> {
        self.designated.into_iter().chain(self.leader)
    }
}
