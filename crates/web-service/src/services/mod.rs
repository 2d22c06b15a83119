//! 服务层模块
//!
//! 包含业务逻辑的服务层实现，遵循六边形架构原则
//!
//! 每个服务方法都会开启自己的会话（事务），成功时提交，失败时回滚后再把错误返回给调用方。

pub mod comment;
pub mod project;
pub mod traits;
pub mod user;

pub use comment::ProjectCommentService;
pub use project::ProjectService;
pub use traits::{ProjectCommentServiceTrait, ProjectServiceTrait, UserServiceTrait};
pub use user::UserService;

use database::{DatabaseError, DatabaseResult, UserRepository};
use sqlx::PgConnection;

/// 校验被引用的用户都存在
///
/// 项目的指派人/负责人、评论的发表人必须是已存在的用户，否则返回参数校验错误。
pub(crate) async fn ensure_users_exist(conn: &mut PgConnection, ids: &[i64]) -> DatabaseResult<()> {
    let mut users = UserRepository::new(conn);
    for &id in ids {
        if !users.exists(id).await? {
            return Err(DatabaseError::validation(format!("引用的用户 {id} 不存在")));
        }
    }
    Ok(())
}
