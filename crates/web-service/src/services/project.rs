//! 项目服务
//!
//! 提供项目相关的业务逻辑操作

use crate::services::ensure_users_exist;
use crate::services::traits::ProjectServiceTrait;
use database::{
    Database, DatabaseError, DatabaseResult, Project, ProjectCommentRepository, ProjectCreate, ProjectDetail,
    ProjectFilter, ProjectRepository, ProjectSearchResult, ProjectUpdate, Repository,
};
use sqlx::PgConnection;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct ProjectService {
    database: Database,
}

impl ProjectService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

async fn create_project(conn: &mut PgConnection, project: &ProjectCreate) -> DatabaseResult<Project> {
    let users: Vec<i64> = project.referenced_users().collect();
    ensure_users_exist(&mut *conn, &users).await?;
    ProjectRepository::new(conn).create(project).await
}

async fn update_project(conn: &mut PgConnection, id: i64, update: &ProjectUpdate) -> DatabaseResult<Project> {
    let users: Vec<i64> = update.referenced_users().collect();
    ensure_users_exist(&mut *conn, &users).await?;
    ProjectRepository::new(conn).update(id, update).await
}

async fn get_project(conn: &mut PgConnection, id: i64) -> DatabaseResult<ProjectDetail> {
    let project = ProjectRepository::new(&mut *conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| DatabaseError::not_found(format!("项目 {id} 不存在")))?;
    let comments = ProjectCommentRepository::new(conn).get_all_by_project_id(id).await?;

    Ok(ProjectDetail { project, comments })
}

#[async_trait::async_trait]
impl ProjectServiceTrait for ProjectService {
    #[instrument(skip(self))]
    async fn search_by_filter_params(&self, filter: ProjectFilter) -> DatabaseResult<ProjectSearchResult> {
        let mut session = self.database.session().await?;
        let result = ProjectRepository::new(session.conn()).find_projects(&filter).await;
        session.finish(result).await
    }

    #[instrument(skip(self, project), fields(title = %project.title))]
    async fn create(&self, project: ProjectCreate) -> DatabaseResult<Project> {
        let mut session = self.database.session().await?;
        let result = create_project(session.conn(), &project).await;
        session.finish(result).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> DatabaseResult<ProjectDetail> {
        let mut session = self.database.session().await?;
        let result = get_project(session.conn(), id).await;
        session.finish(result).await
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: i64, update: ProjectUpdate) -> DatabaseResult<Project> {
        let mut session = self.database.session().await?;
        let result = update_project(session.conn(), id, &update).await;
        session.finish(result).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let mut session = self.database.session().await?;
        let result = ProjectRepository::new(session.conn()).delete(id).await.map(|_| ());
        session.finish(result).await
    }
}
