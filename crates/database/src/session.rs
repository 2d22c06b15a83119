//! 数据库会话
//!
//! 每个 [`Session`] 对应一个数据库事务：创建时 `BEGIN`，结束时必须显式 `commit` 或 `rollback`。
//! 如果会话在没有提交的情况下被丢弃，sqlx 会自动回滚事务。

use crate::{DatabaseError, DatabaseResult};
use sqlx::{PgConnection, Postgres, Transaction};
use tracing::{debug, warn};

/// 事务型数据库会话
pub struct Session {
    tx: Transaction<'static, Postgres>,
}

impl Session {
    pub(crate) fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }

    /// 当前事务使用的连接，传给各个仓库使用
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// 提交事务
    pub async fn commit(self) -> DatabaseResult<()> {
        self.tx.commit().await.map_err(DatabaseError::from)
    }

    /// 回滚事务
    pub async fn rollback(self) -> DatabaseResult<()> {
        self.tx.rollback().await.map_err(DatabaseError::from)
    }

    /// 根据操作结果结束会话
    ///
    /// - `Ok` 时提交事务，提交失败则返回提交的错误
    /// - `Err` 时回滚事务并原样返回错误，回滚本身失败只记录日志
    pub async fn finish<T>(self, result: DatabaseResult<T>) -> DatabaseResult<T> {
        match result {
            Ok(value) => {
                self.commit().await?;
                debug!("✅ 事务已提交");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.rollback().await {
                    warn!("⚠️ 事务回滚失败: {rollback_err}");
                } else {
                    debug!("↩️ 事务已回滚: {err}");
                }
                Err(err)
            }
        }
    }
}
