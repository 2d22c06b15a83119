//! 项目评论仓库

use crate::models::comment::{ProjectComment, ProjectCommentCreate};
use crate::DatabaseResult;
use sqlx::PgConnection;
use tracing::debug;

/// 项目评论仓库结构体
#[derive(Debug)]
pub struct ProjectCommentRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> ProjectCommentRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// 新增一条项目评论
    pub async fn create(&mut self, comment: &ProjectCommentCreate) -> DatabaseResult<ProjectComment> {
        debug!("📝 项目 {} 新增评论", comment.project_id);

        let comment = sqlx::query_as::<_, ProjectComment>(
            r#"
            INSERT INTO project_comments (description, project_id, reporter, created_at)
            VALUES ($1, $2, $3, now())
            RETURNING id, created_at, description, project_id, reporter
            "#,
        )
        .bind(&comment.description)
        .bind(comment.project_id)
        .bind(comment.reporter)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(comment)
    }

    /// 获取项目下的全部评论，最新的在前
    pub async fn get_all_by_project_id(&mut self, project_id: i64) -> DatabaseResult<Vec<ProjectComment>> {
        let comments = sqlx::query_as::<_, ProjectComment>(
            r#"
            SELECT id, created_at, description, project_id, reporter
            FROM project_comments
            WHERE project_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(comments)
    }
}
