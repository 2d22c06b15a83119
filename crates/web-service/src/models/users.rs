use chrono::{DateTime, NaiveDate, Utc};
use database::{DatabaseResult, User, UserDetail, UserFilter};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// 搜索用户列表信息
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserSearch {
    #[param(example = "2025-01-01")]
    /// 创建日期下限（包含当天）
    pub start_at: Option<NaiveDate>,

    #[param(example = "2025-12-31")]
    /// 创建日期上限，包含 `end_at` 当天全天（`created_at < end_at + 1天`），
    /// 而不是只截止到当天 00:00
    pub end_at: Option<NaiveDate>,

    #[param(example = "ada")]
    /// 用户名称（模糊搜索，不区分大小写）
    pub fullname: Option<String>,

    #[param(example = "asc")]
    pub sort_by: Option<String>,

    #[param(example = "fullname")]
    pub order_by: Option<String>,
}

impl UserSearch {
    pub fn into_filter(self) -> DatabaseResult<UserFilter> {
        UserFilter::parse(
            self.start_at,
            self.end_at,
            self.fullname.as_deref(),
            self.sort_by.as_deref(),
            self.order_by.as_deref(),
        )
    }
}

/// 新建用户参数，通过查询字符串传入
#[derive(Deserialize, Debug, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct UserCreate {
    #[param(example = "Ada Lovelace")]
    #[validate(length(min = 1, max = 100))]
    /// 用户全名
    pub fullname: String,
}

impl From<UserCreate> for database::UserCreate {
    fn from(user: UserCreate) -> Self {
        Self { fullname: user.fullname }
    }
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UserUpdate {
    #[schema(example = "Ada King")]
    #[validate(length(min = 1, max = 100))]
    pub fullname: String,
}

impl From<UserUpdate> for database::UserUpdate {
    fn from(user: UserUpdate) -> Self {
        Self { fullname: user.fullname }
    }
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct UserInfo {
    #[schema(example = 1)]
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[schema(example = "Ada Lovelace")]
    pub fullname: String,
    /// 该用户被指派的项目ID
    pub projects_designated: Vec<i64>,
    /// 该用户负责的项目ID
    pub projects_leader: Vec<i64>,
}

impl From<UserDetail> for UserInfo {
    fn from(detail: UserDetail) -> Self {
        let UserDetail { user, projects_designated, projects_leader } = detail;
        let User { id, created_at, updated_at, fullname } = user;
        Self { id, created_at, updated_at, fullname, projects_designated, projects_leader }
    }
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct UserList {
    #[schema(example = 1)]
    pub count: i64,
    pub users: Vec<UserInfo>,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct UserCreated {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct UserUpdated {
    #[schema(example = 1)]
    pub user_id: i64,
}
