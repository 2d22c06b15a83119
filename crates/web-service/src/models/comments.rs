use chrono::{DateTime, Utc};
use database::ProjectComment;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 新增项目评论
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CommentCreate {
    #[schema(example = "Schema review is done")]
    #[validate(length(min = 1, max = 500))]
    /// 评论内容
    pub description: String,

    #[schema(example = 1)]
    /// 发表评论的用户ID
    pub reporter: i64,
}

impl CommentCreate {
    pub fn into_create(self, project_id: i64) -> database::ProjectCommentCreate {
        database::ProjectCommentCreate {
            project_id,
            description: self.description,
            reporter: self.reporter,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct CommentInfo {
    #[schema(example = 7)]
    pub id: i64,
    pub created_at: DateTime<Utc>,
    #[schema(example = "Schema review is done")]
    pub description: String,
    #[schema(example = 3)]
    pub project_id: i64,
    #[schema(example = 1)]
    pub reporter: i64,
}

impl From<ProjectComment> for CommentInfo {
    fn from(comment: ProjectComment) -> Self {
        Self {
            id: comment.id,
            created_at: comment.created_at,
            description: comment.description,
            project_id: comment.project_id,
            reporter: comment.reporter,
        }
    }
}
