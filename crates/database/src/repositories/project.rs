//! 项目仓库
//!
//! 负责项目相关的数据库操作

use crate::models::filter::{ProjectFilter, StatusFilter};
use crate::models::project::{Project, ProjectCreate, ProjectSearchResult, ProjectStatus, ProjectUpdate};
use crate::repositories::traits::Repository;
use crate::repositories::{push_created_range, start_of_day};
use crate::{DatabaseError, DatabaseResult};
use chrono::{NaiveDate, Utc};
use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};
use tracing::debug;

/// 搜索结果行，附带窗口函数计算出的总数
#[derive(Debug, FromRow)]
struct ProjectSearchRow {
    #[sqlx(flatten)]
    project: Project,
    total_count: i64,
}

/// 构造项目搜索SQL
///
/// 过滤条件按 `start_at`、`end_at`、`status` 的顺序以 AND 追加，
/// 排序是两级的：先按 `order_by` 字段和 `sort_by` 方向，再按 `title` 升序。
///
/// 使用 `COUNT(*) OVER ()` 窗口函数在同一次查询中拿到过滤后的总数，
/// 保证总数和返回的数据使用完全相同的过滤条件。
///
/// `today` 用于计算 `overdue`：截止日期早于 `today` 的 00:00 (UTC) 即为逾期。
pub(crate) fn build_search_query(filter: &ProjectFilter, today: NaiveDate) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        "SELECT id, created_at, updated_at, deadline, description, title, status, designated, leader, \
         COUNT(*) OVER () AS total_count FROM project WHERE 1=1",
    );

    push_created_range(&mut query, filter.start_at, filter.end_at);

    match &filter.status {
        Some(StatusFilter::Is(status)) => {
            query.push(" AND status = ");
            query.push_bind(status.as_str());
        }
        Some(StatusFilter::In(statuses)) => {
            let values: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();
            query.push(" AND status = ANY(");
            query.push_bind(values);
            query.push(")");
        }
        Some(StatusFilter::Overdue) => {
            query.push(" AND status <> ");
            query.push_bind(ProjectStatus::Finished.as_str());
            query.push(" AND deadline < ");
            query.push_bind(start_of_day(today));
        }
        None => {}
    }

    // 排序字段来自白名单枚举，可以直接拼接
    query.push(" ORDER BY ");
    query.push(filter.order_by.column());
    query.push(" ");
    query.push(filter.sort_by.keyword());
    query.push(", title ASC");

    query
}

/// 项目仓库结构体
#[derive(Debug)]
pub struct ProjectRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> ProjectRepository<'c> {
    /// 创建新的项目仓库实例
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// 根据过滤参数搜索项目
    ///
    /// 返回全部符合条件的项目（不分页）以及总数 [`ProjectSearchResult`]
    pub async fn find_projects(&mut self, filter: &ProjectFilter) -> DatabaseResult<ProjectSearchResult> {
        debug!("🔍 搜索项目 - 过滤条件: {:?}", filter);

        let mut query = build_search_query(filter, Utc::now().date_naive());
        let rows = query
            .build_query_as::<ProjectSearchRow>()
            .fetch_all(&mut *self.conn)
            .await?;

        let count = rows.first().map(|r| r.total_count).unwrap_or(0);
        let projects: Vec<Project> = rows.into_iter().map(|r| r.project).collect();

        debug!("✅ 搜索完成 - 找到 {} 个项目", count);

        Ok(ProjectSearchResult { projects, count })
    }

    /// 获取指派给某个用户的项目
    pub async fn get_by_designated(&mut self, user_id: i64) -> DatabaseResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, created_at, updated_at, deadline, description, title, status, designated, leader
            FROM project
            WHERE designated = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(projects)
    }

    /// 获取某个用户负责的项目
    pub async fn get_by_leader(&mut self, user_id: i64) -> DatabaseResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, created_at, updated_at, deadline, description, title, status, designated, leader
            FROM project
            WHERE leader = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(projects)
    }

    /// 获取某个状态下的所有项目
    pub async fn get_by_status(&mut self, status: ProjectStatus) -> DatabaseResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, created_at, updated_at, deadline, description, title, status, designated, leader
            FROM project
            WHERE status = $1
            ORDER BY id
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(projects)
    }
}

#[async_trait::async_trait]
impl Repository for ProjectRepository<'_> {
    type Create = ProjectCreate;
    type Update = ProjectUpdate;
    type Entity = Project;

    /// 创建新项目
    async fn create(&mut self, project: &ProjectCreate) -> DatabaseResult<Project> {
        debug!("📝 创建项目: {:#?}", project);

        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO project (deadline, description, title, status, designated, leader, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, now(), now())
            RETURNING id, created_at, updated_at, deadline, description, title, status, designated, leader
            "#,
        )
        .bind(project.deadline)
        .bind(&project.description)
        .bind(&project.title)
        .bind(project.status.as_str())
        .bind(project.designated)
        .bind(project.leader)
        .fetch_one(&mut *self.conn)
        .await?;

        debug!("✅ 项目创建成功: {}", project.id);
        Ok(project)
    }

    async fn get_by_id(&mut self, id: i64) -> DatabaseResult<Option<Project>> {
        debug!("🔍 根据 ID 获取项目: {}", id);

        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, created_at, updated_at, deadline, description, title, status, designated, leader
            FROM project
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(project)
    }

    /// 更新项目信息
    ///
    /// 与部分更新不同，这里所有可修改字段都会被覆盖，传入 `None` 的可空字段会被置为 `NULL`。
    async fn update(&mut self, id: i64, update: &ProjectUpdate) -> DatabaseResult<Project> {
        debug!("🔄 更新项目 {} 信息: {:#?}", id, update);

        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE project
            SET deadline = $2,
                description = $3,
                title = $4,
                status = $5,
                designated = $6,
                leader = $7,
                updated_at = now()
            WHERE id = $1
            RETURNING id, created_at, updated_at, deadline, description, title, status, designated, leader
            "#,
        )
        .bind(id)
        .bind(update.deadline)
        .bind(&update.description)
        .bind(&update.title)
        .bind(update.status.as_str())
        .bind(update.designated)
        .bind(update.leader)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found(format!("项目 {id} 不存在")))?;

        debug!("✅ 项目更新成功: {}", project.id);
        Ok(project)
    }

    /// 删除项目，项目下的评论由外键级联删除
    async fn delete(&mut self, id: i64) -> DatabaseResult<Project> {
        debug!("🗑️ 删除项目: {}", id);

        let project = sqlx::query_as::<_, Project>(
            r#"
            DELETE FROM project
            WHERE id = $1
            RETURNING id, created_at, updated_at, deadline, description, title, status, designated, leader
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found(format!("项目 {id} 不存在")))?;

        debug!("✅ 项目删除成功: {}", project.id);
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filter::{ProjectOrderField, SortDirection};
    use crate::models::user::UserCreate;
    use crate::repositories::UserRepository;
    use crate::Database;
    use chrono::{Duration, NaiveDate};
    use sqlx::PgPool;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_project(title: &str, status: ProjectStatus) -> ProjectCreate {
        ProjectCreate {
            deadline: None,
            description: format!("{title} description"),
            title: title.to_string(),
            status,
            designated: None,
            leader: None,
        }
    }

    #[test]
    fn empty_filter_sorts_by_created_at_then_title() {
        let query = build_search_query(&ProjectFilter::default(), date(2025, 1, 1));
        let sql = query.sql();

        assert!(sql.ends_with("FROM project WHERE 1=1 ORDER BY created_at ASC, title ASC"), "{sql}");
    }

    #[test]
    fn filters_are_applied_in_fixed_order() {
        let filter = ProjectFilter {
            start_at: Some(date(2025, 1, 1)),
            end_at: Some(date(2025, 1, 31)),
            status: Some(StatusFilter::Overdue),
            sort_by: SortDirection::Desc,
            order_by: ProjectOrderField::Deadline,
        };
        let query = build_search_query(&filter, date(2025, 2, 1));
        let sql = query.sql();

        assert!(
            sql.ends_with(
                "WHERE 1=1 AND created_at >= $1 AND created_at < $2 AND status <> $3 AND deadline < $4 \
                 ORDER BY deadline DESC, title ASC"
            ),
            "{sql}"
        );
    }

    #[test]
    fn status_set_uses_any() {
        let filter = ProjectFilter {
            status: Some(StatusFilter::In(vec![ProjectStatus::Analysis, ProjectStatus::Testing])),
            ..Default::default()
        };
        let query = build_search_query(&filter, date(2025, 1, 1));

        assert!(query.sql().contains("WHERE 1=1 AND status = ANY($1) ORDER BY"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn create_returns_stored_fields(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();

        let leader = UserRepository::new(session.conn())
            .create(&UserCreate { fullname: "Ada Lovelace".to_string() })
            .await
            .unwrap();

        let deadline = Utc::now().date_naive().and_hms_opt(12, 0, 0).unwrap().and_utc();
        let create = ProjectCreate {
            deadline: Some(deadline),
            leader: Some(leader.id),
            ..new_project("Migrate DB", ProjectStatus::Analysis)
        };

        let mut repo = ProjectRepository::new(session.conn());
        let project = repo.create(&create).await.unwrap();

        assert!(project.id > 0);
        assert_eq!(project.title, "Migrate DB");
        assert_eq!(project.description, create.description);
        assert_eq!(project.status, ProjectStatus::Analysis);
        assert_eq!(project.deadline, Some(deadline));
        assert_eq!(project.leader, Some(leader.id));
        assert_eq!(project.designated, None);

        let stored = repo.get_by_id(project.id).await.unwrap();
        assert_eq!(stored, Some(project));

        session.commit().await.unwrap();
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn update_overwrites_every_field(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();
        let mut repo = ProjectRepository::new(session.conn());

        let project = repo
            .create(&ProjectCreate {
                deadline: Some(Utc::now()),
                ..new_project("Old", ProjectStatus::Development)
            })
            .await
            .unwrap();

        let update = ProjectUpdate {
            deadline: None,
            description: "new description".to_string(),
            title: "New".to_string(),
            status: ProjectStatus::Finished,
            designated: None,
            leader: None,
        };

        let first = repo.update(project.id, &update).await.unwrap();
        let second = repo.update(project.id, &update).await.unwrap();

        assert_eq!(first.deadline, None);
        assert_eq!(first.title, "New");
        assert_eq!(first.status, ProjectStatus::Finished);
        assert_eq!(
            (first.deadline, &first.description, &first.title, first.status, first.designated, first.leader),
            (second.deadline, &second.description, &second.title, second.status, second.designated, second.leader)
        );
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn update_and_delete_of_missing_project_are_not_found(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();
        let mut repo = ProjectRepository::new(session.conn());

        let update = ProjectUpdate {
            deadline: None,
            description: "d".to_string(),
            title: "t".to_string(),
            status: ProjectStatus::Analysis,
            designated: None,
            leader: None,
        };

        assert!(matches!(repo.update(999, &update).await, Err(DatabaseError::NotFound(_))));
        assert!(matches!(repo.delete(999).await, Err(DatabaseError::NotFound(_))));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn empty_title_violates_check_constraint(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();

        let result = ProjectRepository::new(session.conn())
            .create(&new_project("", ProjectStatus::Analysis))
            .await;

        assert!(matches!(result, Err(DatabaseError::ValidationError(_))));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn overdue_returns_only_unfinished_past_deadline(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();
        let mut repo = ProjectRepository::new(session.conn());

        let past = Utc::now() - Duration::days(3);
        let future = Utc::now() + Duration::days(3);

        let late = repo
            .create(&ProjectCreate { deadline: Some(past), ..new_project("Late", ProjectStatus::Development) })
            .await
            .unwrap();
        repo.create(&ProjectCreate { deadline: Some(past), ..new_project("Done", ProjectStatus::Finished) })
            .await
            .unwrap();
        repo.create(&ProjectCreate { deadline: Some(future), ..new_project("Later", ProjectStatus::Testing) })
            .await
            .unwrap();
        repo.create(&new_project("No deadline", ProjectStatus::Analysis)).await.unwrap();

        let filter = ProjectFilter { status: Some(StatusFilter::Overdue), ..Default::default() };
        let result = repo.find_projects(&filter).await.unwrap();

        assert_eq!(result.count, 1);
        assert_eq!(result.projects.len(), 1);
        assert_eq!(result.projects[0].id, late.id);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn search_applies_status_and_date_filters(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();
        let mut repo = ProjectRepository::new(session.conn());

        let a = repo.create(&new_project("A", ProjectStatus::Analysis)).await.unwrap();
        let b = repo.create(&new_project("B", ProjectStatus::Testing)).await.unwrap();
        let c = repo.create(&new_project("C", ProjectStatus::Finished)).await.unwrap();

        // 把C的创建时间挪到过去
        sqlx::query("UPDATE project SET created_at = '2020-06-15T10:00:00Z' WHERE id = $1")
            .bind(c.id)
            .execute(&mut *repo.conn)
            .await
            .unwrap();

        let filter = ProjectFilter::parse(None, None, Some("analysis,testing"), None, Some("title")).unwrap();
        let result = repo.find_projects(&filter).await.unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(result.projects.iter().map(|p| p.id).collect::<Vec<_>>(), vec![a.id, b.id]);

        let filter = ProjectFilter::parse(Some(date(2020, 6, 15)), Some(date(2020, 6, 15)), None, None, None).unwrap();
        let result = repo.find_projects(&filter).await.unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.projects[0].id, c.id);

        let filter = ProjectFilter::parse(None, Some(date(2020, 6, 14)), None, None, None).unwrap();
        let result = repo.find_projects(&filter).await.unwrap();
        assert_eq!(result.count, 0);
        assert!(result.projects.is_empty());

        let empty = repo.find_projects(&ProjectFilter::default()).await.unwrap();
        assert_eq!(empty.count, 3);
        assert_eq!(empty.projects[0].id, c.id);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn equal_sort_keys_fall_back_to_title(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();
        let mut repo = ProjectRepository::new(session.conn());

        for title in ["Charlie", "Alpha", "Bravo"] {
            repo.create(&new_project(title, ProjectStatus::Analysis)).await.unwrap();
        }
        repo.create(&new_project("Delta", ProjectStatus::Testing)).await.unwrap();

        let filter = ProjectFilter::parse(None, None, None, Some("desc"), Some("status")).unwrap();
        let result = repo.find_projects(&filter).await.unwrap();

        let titles: Vec<&str> = result.projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Delta", "Alpha", "Bravo", "Charlie"]);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn lookup_by_user_and_status(pool: PgPool) {
        let database = Database::new(pool);
        let mut session = database.session().await.unwrap();

        let user = UserRepository::new(session.conn())
            .create(&UserCreate { fullname: "Grace Hopper".to_string() })
            .await
            .unwrap();

        let mut repo = ProjectRepository::new(session.conn());
        let led = repo
            .create(&ProjectCreate { leader: Some(user.id), ..new_project("Led", ProjectStatus::Testing) })
            .await
            .unwrap();
        let assigned = repo
            .create(&ProjectCreate { designated: Some(user.id), ..new_project("Assigned", ProjectStatus::Analysis) })
            .await
            .unwrap();

        assert_eq!(repo.get_by_leader(user.id).await.unwrap(), vec![led.clone()]);
        assert_eq!(repo.get_by_designated(user.id).await.unwrap(), vec![assigned]);
        assert_eq!(repo.get_by_status(ProjectStatus::Testing).await.unwrap(), vec![led]);
        assert!(repo.get_by_status(ProjectStatus::Finished).await.unwrap().is_empty());
    }
}
