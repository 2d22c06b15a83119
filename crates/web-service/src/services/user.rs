//! 用户服务

use crate::services::traits::UserServiceTrait;
use database::{
    Database, DatabaseError, DatabaseResult, ProjectRepository, Repository, User, UserCreate, UserDetail, UserFilter,
    UserRepository, UserSearchResult, UserUpdate,
};
use sqlx::PgConnection;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct UserService {
    database: Database,
}

impl UserService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

/// 查询用户，并通过项目表计算被指派/负责的项目
async fn get_user(conn: &mut PgConnection, id: i64) -> DatabaseResult<UserDetail> {
    let user = UserRepository::new(&mut *conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| DatabaseError::not_found(format!("用户 {id} 不存在")))?;

    let mut projects = ProjectRepository::new(conn);
    let projects_designated = projects.get_by_designated(id).await?.into_iter().map(|p| p.id).collect();
    let projects_leader = projects.get_by_leader(id).await?.into_iter().map(|p| p.id).collect();

    Ok(UserDetail { user, projects_designated, projects_leader })
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    #[instrument(skip(self))]
    async fn search_by_filter_params(&self, filter: UserFilter) -> DatabaseResult<UserSearchResult> {
        let mut session = self.database.session().await?;
        let result = UserRepository::new(session.conn()).find_users(&filter).await;
        session.finish(result).await
    }

    #[instrument(skip(self))]
    async fn create(&self, user: UserCreate) -> DatabaseResult<User> {
        let mut session = self.database.session().await?;
        let result = UserRepository::new(session.conn()).create(&user).await;
        session.finish(result).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> DatabaseResult<UserDetail> {
        let mut session = self.database.session().await?;
        let result = get_user(session.conn(), id).await;
        session.finish(result).await
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i64, update: UserUpdate) -> DatabaseResult<User> {
        let mut session = self.database.session().await?;
        let result = UserRepository::new(session.conn()).update(id, &update).await;
        session.finish(result).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let mut session = self.database.session().await?;
        let result = UserRepository::new(session.conn()).delete(id).await.map(|_| ());
        session.finish(result).await
    }
}
