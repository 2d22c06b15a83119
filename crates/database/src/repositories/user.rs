//! 用户仓库
//!
//! 负责用户相关的数据库操作

use crate::models::filter::UserFilter;
use crate::models::user::{User, UserCreate, UserDetail, UserSearchResult, UserUpdate};
use crate::repositories::push_created_range;
use crate::repositories::traits::Repository;
use crate::{DatabaseError, DatabaseResult};
use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};
use tracing::debug;

#[derive(Debug, FromRow)]
struct UserSearchRow {
    #[sqlx(flatten)]
    detail: UserDetail,
    total_count: i64,
}

/// 构造用户搜索SQL
///
/// 每一行都会带上该用户被指派、负责的项目ID列表，排序为 `order_by` 再按 `fullname` 升序。
pub(crate) fn build_search_query(filter: &UserFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        r#"SELECT u.id, u.created_at, u.updated_at, u.fullname,
       ARRAY(SELECT p.id FROM project p WHERE p.designated = u.id ORDER BY p.id) AS projects_designated,
       ARRAY(SELECT p.id FROM project p WHERE p.leader = u.id ORDER BY p.id) AS projects_leader,
       COUNT(*) OVER () AS total_count
FROM "user" u WHERE 1=1"#,
    );

    push_created_range(&mut query, filter.start_at, filter.end_at);

    if let Some(fullname) = &filter.fullname {
        query.push(" AND fullname ILIKE ");
        query.push_bind(format!("%{}%", escape_like(fullname)));
    }

    query.push(" ORDER BY ");
    query.push(filter.order_by.column());
    query.push(" ");
    query.push(filter.sort_by.keyword());
    query.push(", fullname ASC");

    query
}

/// 转义 `LIKE` 模式中的通配符，让用户输入只按字面匹配
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 用户仓库结构体
#[derive(Debug)]
pub struct UserRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> UserRepository<'c> {
    /// 创建新的用户仓库实例
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// 根据过滤参数搜索用户
    pub async fn find_users(&mut self, filter: &UserFilter) -> DatabaseResult<UserSearchResult> {
        debug!("🔍 搜索用户 - 过滤条件: {:?}", filter);

        let mut query = build_search_query(filter);
        let rows = query
            .build_query_as::<UserSearchRow>()
            .fetch_all(&mut *self.conn)
            .await?;

        let count = rows.first().map(|r| r.total_count).unwrap_or(0);
        let users: Vec<UserDetail> = rows.into_iter().map(|r| r.detail).collect();

        debug!("✅ 搜索完成 - 找到 {} 个用户", count);

        Ok(UserSearchResult { users, count })
    }

    /// 判断用户是否存在
    pub async fn exists(&mut self, id: i64) -> DatabaseResult<bool> {
        let exists: bool = sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM "user" WHERE id = $1)"#)
            .bind(id)
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(exists)
    }
}

#[async_trait::async_trait]
impl Repository for UserRepository<'_> {
    type Create = UserCreate;
    type Update = UserUpdate;
    type Entity = User;

    async fn create(&mut self, user: &UserCreate) -> DatabaseResult<User> {
        debug!("📝 创建用户: {:#?}", user);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (fullname, created_at, updated_at)
            VALUES ($1, now(), now())
            RETURNING id, created_at, updated_at, fullname
            "#,
        )
        .bind(&user.fullname)
        .fetch_one(&mut *self.conn)
        .await?;

        debug!("✅ 用户创建成功: {}", user.id);
        Ok(user)
    }

    async fn get_by_id(&mut self, id: i64) -> DatabaseResult<Option<User>> {
        debug!("🔍 根据 ID 获取用户: {}", id);

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, fullname
            FROM "user"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(user)
    }

    async fn update(&mut self, id: i64, update: &UserUpdate) -> DatabaseResult<User> {
        debug!("🔄 更新用户 {} 信息: {:#?}", id, update);

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE "user"
            SET fullname = $2,
                updated_at = now()
            WHERE id = $1
            RETURNING id, created_at, updated_at, fullname
            "#,
        )
        .bind(id)
        .bind(&update.fullname)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found(format!("用户 {id} 不存在")))?;

        Ok(user)
    }

    /// 删除用户
    ///
    /// 引用该用户的项目会把指派人/负责人置空；用户仍有评论时会返回 [`DatabaseError::Conflict`]。
    async fn delete(&mut self, id: i64) -> DatabaseResult<User> {
        debug!("🗑️ 删除用户: {}", id);

        let user = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM "user"
            WHERE id = $1
            RETURNING id, created_at, updated_at, fullname
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found(format!("用户 {id} 不存在")))?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::comment::ProjectCommentCreate;
    use crate::models::filter::{SortDirection, UserOrderField};
    use crate::models::project::{ProjectCreate, ProjectStatus};
    use crate::repositories::{ProjectCommentRepository, ProjectRepository};
    use crate::Database;
    use sqlx::PgPool;

    fn project_for(leader: Option<i64>, designated: Option<i64>) -> ProjectCreate {
        ProjectCreate {
            deadline: None,
            description: "description".to_string(),
            title: "title".to_string(),
            status: ProjectStatus::Analysis,
            designated,
            leader,
        }
    }

    #[test]
    fn search_sql_has_fullname_tie_break() {
        let filter = UserFilter {
            fullname: Some("ada".to_string()),
            sort_by: SortDirection::Desc,
            order_by: UserOrderField::Id,
            ..Default::default()
        };
        let query = build_search_query(&filter);

        assert!(
            query.sql().ends_with("WHERE 1=1 AND fullname ILIKE $1 ORDER BY id DESC, fullname ASC"),
            "{}",
            query.sql()
        );
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn search_includes_derived_project_ids(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();

        let mut users = UserRepository::new(session.conn());
        let ada = users.create(&UserCreate { fullname: "Ada".to_string() }).await.unwrap();
        let bob = users.create(&UserCreate { fullname: "Bob".to_string() }).await.unwrap();

        let mut projects = ProjectRepository::new(session.conn());
        let p1 = projects.create(&project_for(Some(ada.id), Some(bob.id))).await.unwrap();
        let p2 = projects.create(&project_for(Some(ada.id), None)).await.unwrap();

        let filter = UserFilter { order_by: UserOrderField::Fullname, ..Default::default() };
        let result = UserRepository::new(session.conn()).find_users(&filter).await.unwrap();

        assert_eq!(result.count, 2);
        assert_eq!(result.users[0].user, ada);
        assert_eq!(result.users[0].projects_leader, vec![p1.id, p2.id]);
        assert!(result.users[0].projects_designated.is_empty());
        assert_eq!(result.users[1].user, bob);
        assert_eq!(result.users[1].projects_designated, vec![p1.id]);

        let filter = UserFilter { fullname: Some("bO".to_string()), ..Default::default() };
        let result = UserRepository::new(session.conn()).find_users(&filter).await.unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.users[0].user.id, bob.id);
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("ada"), "ada");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn fullname_filter_matches_wildcards_literally(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();

        let mut users = UserRepository::new(session.conn());
        users.create(&UserCreate { fullname: "Ada".to_string() }).await.unwrap();
        let percent = users.create(&UserCreate { fullname: "100% Bob".to_string() }).await.unwrap();
        users.create(&UserCreate { fullname: "Snake_Case".to_string() }).await.unwrap();

        let filter = UserFilter { fullname: Some("%".to_string()), ..Default::default() };
        let result = users.find_users(&filter).await.unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.users[0].user.id, percent.id);

        let filter = UserFilter { fullname: Some("e_c".to_string()), ..Default::default() };
        assert_eq!(users.find_users(&filter).await.unwrap().count, 1);

        let filter = UserFilter { fullname: Some("a_a".to_string()), ..Default::default() };
        assert_eq!(users.find_users(&filter).await.unwrap().count, 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn deleting_a_leader_clears_the_reference(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();

        let ada = UserRepository::new(session.conn())
            .create(&UserCreate { fullname: "Ada".to_string() })
            .await
            .unwrap();
        let project = ProjectRepository::new(session.conn())
            .create(&project_for(Some(ada.id), Some(ada.id)))
            .await
            .unwrap();

        let deleted = UserRepository::new(session.conn()).delete(ada.id).await.unwrap();
        assert_eq!(deleted.id, ada.id);

        let project = ProjectRepository::new(session.conn()).get_by_id(project.id).await.unwrap().unwrap();
        assert_eq!(project.leader, None);
        assert_eq!(project.designated, None);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn deleting_a_reporter_is_a_conflict(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();

        let ada = UserRepository::new(session.conn())
            .create(&UserCreate { fullname: "Ada".to_string() })
            .await
            .unwrap();
        let project = ProjectRepository::new(session.conn())
            .create(&project_for(None, None))
            .await
            .unwrap();
        ProjectCommentRepository::new(session.conn())
            .create(&ProjectCommentCreate {
                project_id: project.id,
                description: "looks good".to_string(),
                reporter: ada.id,
            })
            .await
            .unwrap();

        let result = UserRepository::new(session.conn()).delete(ada.id).await;
        assert!(matches!(result, Err(DatabaseError::Conflict(_))));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn exists_and_missing_user(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();
        let mut users = UserRepository::new(session.conn());

        let ada = users.create(&UserCreate { fullname: "Ada".to_string() }).await.unwrap();

        assert!(users.exists(ada.id).await.unwrap());
        assert!(!users.exists(ada.id + 1000).await.unwrap());
        assert_eq!(users.get_by_id(ada.id + 1000).await.unwrap(), None);
        assert!(matches!(
            users.update(ada.id + 1000, &UserUpdate { fullname: "x".to_string() }).await,
            Err(DatabaseError::NotFound(_))
        ));
    }
}
