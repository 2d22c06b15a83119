//! 数据库仓库模块
//!
//! 这里定义数据库操作的Repository层

pub mod comment;
pub mod project;
pub mod traits;
pub mod user;

// 重新导出具体的类型
pub use comment::ProjectCommentRepository;
pub use project::ProjectRepository;
pub use traits::Repository;
pub use user::UserRepository;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use sqlx::{Postgres, QueryBuilder};

/// 某一天的 00:00 (UTC)
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// 追加 `created_at` 的日期区间条件，两端都包含当天
pub(crate) fn push_created_range(
    query: &mut QueryBuilder<'static, Postgres>,
    start_at: Option<NaiveDate>,
    end_at: Option<NaiveDate>,
) {
    if let Some(start_at) = start_at {
        query.push(" AND created_at >= ");
        query.push_bind(start_of_day(start_at));
    }
    // 结束日期的第二天 00:00 之前都算在范围内
    if let Some(next_day) = end_at.and_then(|end_at| end_at.checked_add_days(Days::new(1))) {
        query.push(" AND created_at < ");
        query.push_bind(start_of_day(next_day));
    }
}
