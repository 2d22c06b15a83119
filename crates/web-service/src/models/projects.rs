use crate::models::comments::CommentInfo;
use chrono::{DateTime, NaiveDate, Utc};
use database::{DatabaseResult, Project, ProjectDetail, ProjectFilter, ProjectStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// 搜索项目列表信息
///
/// 所有参数都是可选的，空字符串等同于没有传入。
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectSearch {
    #[param(example = "2025-01-01")]
    /// 创建日期下限（包含当天）
    pub start_at: Option<NaiveDate>,

    #[param(example = "2025-12-31")]
    /// 创建日期上限，包含 `end_at` 当天全天（`created_at < end_at + 1天`），
    /// 而不是只截止到当天 00:00
    pub end_at: Option<NaiveDate>,

    #[param(example = "analysis,testing")]
    /// 项目状态：单个状态、逗号分隔的多个状态，或者 `overdue` 查询已逾期项目
    pub status: Option<String>,

    #[param(example = "desc")]
    /// 排序方向：`asc` 或者 `desc`
    pub sort_by: Option<String>,

    #[param(example = "deadline")]
    /// 排序字段，默认 `created_at`
    pub order_by: Option<String>,
}

impl ProjectSearch {
    /// 转换为仓库层的过滤条件，不合法的取值会返回对应的错误
    pub fn into_filter(self) -> DatabaseResult<ProjectFilter> {
        ProjectFilter::parse(
            self.start_at,
            self.end_at,
            self.status.as_deref(),
            self.sort_by.as_deref(),
            self.order_by.as_deref(),
        )
    }
}

/// 新建项目参数，通过查询字符串传入
#[derive(Deserialize, Debug, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ProjectCreate {
    #[param(example = "2025-03-01T00:00:00Z")]
    /// 截止时间
    pub deadline: Option<DateTime<Utc>>,

    #[param(example = "Move the data to the new cluster")]
    #[validate(length(min = 1, max = 500))]
    /// 项目描述
    pub description: String,

    #[param(example = "Migrate DB")]
    #[validate(length(min = 1, max = 100))]
    /// 项目标题
    pub title: String,

    #[param(value_type = Option<String>, example = "analysis")]
    /// 项目状态，默认 `analysis`
    pub status: Option<ProjectStatus>,

    #[param(example = 1)]
    /// 被指派的用户ID
    pub designated: Option<i64>,

    #[param(example = 1)]
    /// 项目负责人ID
    pub leader: Option<i64>,
}

impl From<ProjectCreate> for database::ProjectCreate {
    fn from(project: ProjectCreate) -> Self {
        Self {
            deadline: project.deadline,
            description: project.description,
            title: project.title,
            status: project.status.unwrap_or_default(),
            designated: project.designated,
            leader: project.leader,
        }
    }
}

/// 更新项目信息
///
/// 更新是整体覆盖，没有传入的可选字段会被清空。
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ProjectUpdate {
    #[schema(example = "2025-03-01T00:00:00Z")]
    pub deadline: Option<DateTime<Utc>>,

    #[schema(example = "Move the data to the new cluster")]
    #[validate(length(min = 1, max = 500))]
    pub description: String,

    #[schema(example = "Migrate DB")]
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[schema(value_type = String, example = "testing")]
    pub status: ProjectStatus,

    #[schema(example = 1)]
    pub designated: Option<i64>,

    #[schema(example = 1)]
    pub leader: Option<i64>,
}

impl From<ProjectUpdate> for database::ProjectUpdate {
    fn from(update: ProjectUpdate) -> Self {
        Self {
            deadline: update.deadline,
            description: update.description,
            title: update.title,
            status: update.status,
            designated: update.designated,
            leader: update.leader,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ProjectInfo {
    #[schema(example = 15)]
    /// 项目ID
    pub id: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,

    #[schema(example = "Move the data to the new cluster")]
    pub description: String,

    #[schema(example = "Migrate DB")]
    /// 项目标题
    pub title: String,

    #[schema(value_type = String, example = "analysis")]
    pub status: ProjectStatus,

    pub designated: Option<i64>,
    pub leader: Option<i64>,
}

impl From<Project> for ProjectInfo {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            created_at: project.created_at,
            updated_at: project.updated_at,
            deadline: project.deadline,
            description: project.description,
            title: project.title,
            status: project.status,
            designated: project.designated,
            leader: project.leader,
        }
    }
}

/// 项目详情，评论按时间倒序
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ProjectDetailInfo {
    #[serde(flatten)]
    pub project: ProjectInfo,
    pub comments: Vec<CommentInfo>,
}

impl From<ProjectDetail> for ProjectDetailInfo {
    fn from(detail: ProjectDetail) -> Self {
        Self {
            project: detail.project.into(),
            comments: detail.comments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ProjectList {
    #[schema(example = 2)]
    /// 符合过滤条件的项目总数
    pub count: i64,
    pub projects: Vec<ProjectInfo>,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ProjectCreated {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Migrate DB")]
    pub title: String,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ProjectUpdated {
    #[schema(example = 1)]
    pub project_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_to_analysis() {
        let create = ProjectCreate {
            deadline: None,
            description: "d".to_string(),
            title: "t".to_string(),
            status: None,
            designated: None,
            leader: None,
        };
        let db: database::ProjectCreate = create.into();
        assert_eq!(db.status, ProjectStatus::Analysis);
    }

    #[test]
    fn create_validates_lengths() {
        let create = ProjectCreate {
            deadline: None,
            description: "d".to_string(),
            title: "x".repeat(101),
            status: None,
            designated: None,
            leader: None,
        };
        assert!(create.validate().is_err());
    }

    #[test]
    fn update_requires_status() {
        let body = r#"{"description": "d", "title": "t"}"#;
        assert!(serde_json::from_str::<ProjectUpdate>(body).is_err());

        let body = r#"{"description": "d", "title": "t", "status": "finished"}"#;
        let update: ProjectUpdate = serde_json::from_str(body).unwrap();
        assert_eq!(update.status, ProjectStatus::Finished);
        assert!(update.deadline.is_none());
    }

    #[test]
    fn search_rejects_unknown_order_field() {
        let search = ProjectSearch { order_by: Some("password".to_string()), ..Default::default() };
        assert!(search.into_filter().is_err());
    }
}
