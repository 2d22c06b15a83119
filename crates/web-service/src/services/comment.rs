//! 项目评论服务

use crate::services::ensure_users_exist;
use crate::services::traits::ProjectCommentServiceTrait;
use database::{
    Database, DatabaseError, DatabaseResult, ProjectComment, ProjectCommentCreate, ProjectCommentRepository,
    ProjectRepository, Repository,
};
use sqlx::PgConnection;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct ProjectCommentService {
    database: Database,
}

impl ProjectCommentService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

async fn create_comment(conn: &mut PgConnection, comment: &ProjectCommentCreate) -> DatabaseResult<ProjectComment> {
    let project_id = comment.project_id;
    if ProjectRepository::new(&mut *conn).get_by_id(project_id).await?.is_none() {
        return Err(DatabaseError::not_found(format!("项目 {project_id} 不存在")));
    }
    ensure_users_exist(&mut *conn, &[comment.reporter]).await?;

    ProjectCommentRepository::new(conn).create(comment).await
}

#[async_trait::async_trait]
impl ProjectCommentServiceTrait for ProjectCommentService {
    #[instrument(skip(self, comment), fields(project_id = comment.project_id))]
    async fn create(&self, comment: ProjectCommentCreate) -> DatabaseResult<ProjectComment> {
        let mut session = self.database.session().await?;
        let result = create_comment(session.conn(), &comment).await;
        session.finish(result).await
    }
}
