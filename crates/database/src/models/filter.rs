//! 列表查询的过滤与排序参数
//!
//! 所有字符串形式的查询参数都在这里被解析为强类型的过滤条件，
//! 排序字段只能取白名单中的值，未知字段直接返回 [`DatabaseError::InvalidField`]。

use crate::error::DatabaseError;
use crate::models::project::ProjectStatus;
use chrono::NaiveDate;
use std::str::FromStr;

/// 排序方向，默认升序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(DatabaseError::validation(format!("sort_by 只能是 asc 或 desc: {other}"))),
        }
    }
}

/// 项目状态过滤条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    /// `status = value`
    Is(ProjectStatus),
    /// `status IN (values)`
    In(Vec<ProjectStatus>),
    /// 未完成且截止日期早于今天
    Overdue,
}

impl FromStr for StatusFilter {
    type Err = DatabaseError;

    /// 支持三种写法：`overdue`、单个状态、逗号分隔的多个状态
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "overdue" {
            return Ok(StatusFilter::Overdue);
        }

        let parse = |value: &str| value.trim().parse::<ProjectStatus>().map_err(DatabaseError::validation);

        if s.contains(',') {
            let statuses = s
                .split(',')
                .filter(|value| !value.trim().is_empty())
                .map(parse)
                .collect::<Result<Vec<_>, _>>()?;
            if statuses.is_empty() {
                return Err(DatabaseError::validation(format!("status 至少需要一个有效的状态: {s}")));
            }
            Ok(StatusFilter::In(statuses))
        } else {
            Ok(StatusFilter::Is(parse(s)?))
        }
    }
}

/// 项目列表可用的排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectOrderField {
    Id,
    #[default]
    CreatedAt,
    UpdatedAt,
    Deadline,
    Description,
    Designated,
    Leader,
    Status,
    Title,
}

impl ProjectOrderField {
    const ALL: [ProjectOrderField; 9] = [
        ProjectOrderField::Id,
        ProjectOrderField::CreatedAt,
        ProjectOrderField::UpdatedAt,
        ProjectOrderField::Deadline,
        ProjectOrderField::Description,
        ProjectOrderField::Designated,
        ProjectOrderField::Leader,
        ProjectOrderField::Status,
        ProjectOrderField::Title,
    ];

    /// 对应的数据库列名
    pub fn column(&self) -> &'static str {
        match self {
            ProjectOrderField::Id => "id",
            ProjectOrderField::CreatedAt => "created_at",
            ProjectOrderField::UpdatedAt => "updated_at",
            ProjectOrderField::Deadline => "deadline",
            ProjectOrderField::Description => "description",
            ProjectOrderField::Designated => "designated",
            ProjectOrderField::Leader => "leader",
            ProjectOrderField::Status => "status",
            ProjectOrderField::Title => "title",
        }
    }
}

impl FromStr for ProjectOrderField {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| DatabaseError::InvalidField(s.to_string()))
    }
}

/// 用户列表可用的排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserOrderField {
    Id,
    #[default]
    CreatedAt,
    UpdatedAt,
    Fullname,
}

impl UserOrderField {
    const ALL: [UserOrderField; 4] = [
        UserOrderField::Id,
        UserOrderField::CreatedAt,
        UserOrderField::UpdatedAt,
        UserOrderField::Fullname,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            UserOrderField::Id => "id",
            UserOrderField::CreatedAt => "created_at",
            UserOrderField::UpdatedAt => "updated_at",
            UserOrderField::Fullname => "fullname",
        }
    }
}

impl FromStr for UserOrderField {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| DatabaseError::InvalidField(s.to_string()))
    }
}

/// 项目列表过滤参数
///
/// 条件按 `start_at`、`end_at`、`status` 的固定顺序以 AND 组合，
/// 排序为 `order_by` + `sort_by`，再按 `title` 升序兜底。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// 创建时间下限（包含当天）
    pub start_at: Option<NaiveDate>,
    /// 创建时间上限（包含当天）
    pub end_at: Option<NaiveDate>,
    pub status: Option<StatusFilter>,
    pub sort_by: SortDirection,
    pub order_by: ProjectOrderField,
}

impl ProjectFilter {
    /// 从原始查询参数构造过滤条件，空字符串视为未传
    pub fn parse(
        start_at: Option<NaiveDate>,
        end_at: Option<NaiveDate>,
        status: Option<&str>,
        sort_by: Option<&str>,
        order_by: Option<&str>,
    ) -> Result<Self, DatabaseError> {
        Ok(Self {
            start_at,
            end_at,
            status: non_empty(status).map(str::parse::<StatusFilter>).transpose()?,
            sort_by: non_empty(sort_by).map(str::parse::<SortDirection>).transpose()?.unwrap_or_default(),
            order_by: non_empty(order_by).map(str::parse::<ProjectOrderField>).transpose()?.unwrap_or_default(),
        })
    }
}

/// 用户列表过滤参数
///
/// 排序为 `order_by` + `sort_by`，再按 `fullname` 升序兜底。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub start_at: Option<NaiveDate>,
    pub end_at: Option<NaiveDate>,
    /// 姓名模糊搜索（不区分大小写）
    pub fullname: Option<String>,
    pub sort_by: SortDirection,
    pub order_by: UserOrderField,
}

impl UserFilter {
    pub fn parse(
        start_at: Option<NaiveDate>,
        end_at: Option<NaiveDate>,
        fullname: Option<&str>,
        sort_by: Option<&str>,
        order_by: Option<&str>,
    ) -> Result<Self, DatabaseError> {
        Ok(Self {
            start_at,
            end_at,
            fullname: non_empty(fullname).map(str::to_string),
            sort_by: non_empty(sort_by).map(str::parse::<SortDirection>).transpose()?.unwrap_or_default(),
            order_by: non_empty(order_by).map(str::parse::<UserOrderField>).transpose()?.unwrap_or_default(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
