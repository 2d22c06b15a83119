use std::io::ErrorKind;
use thiserror::Error;

/// 数据库操作错误类型
///
/// 这是一个封闭的错误分类，Web层会把每一种错误映射到确定的HTTP状态码。
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLX 错误
    #[error("数据库操作错误: {0}")]
    SqlxError(#[source] sqlx::Error),

    /// 连接错误
    #[error("数据库连接错误: {0}")]
    ConnectionError(String),

    /// 数据库服务器拒绝连接
    #[error("无法连接到数据库服务器: {0}")]
    Unreachable(String),

    /// 迁移错误
    #[error("数据库迁移错误: {0}")]
    MigrationError(String),

    /// 记录不存在
    #[error("{0}")]
    NotFound(String),

    /// 参数校验错误
    #[error("{0}")]
    ValidationError(String),

    /// 排序/过滤时使用了不存在的字段
    #[error("无效的字段: {0}")]
    InvalidField(String),

    /// 违反外键约束，例如删除仍被评论引用的用户
    #[error("数据冲突: {0}")]
    Conflict(String),
}

impl DatabaseError {
    /// 创建连接错误
    pub fn connection<T: ToString>(msg: T) -> Self {
        Self::ConnectionError(msg.to_string())
    }

    /// 创建迁移错误
    pub fn migration<T: ToString>(msg: T) -> Self {
        Self::MigrationError(msg.to_string())
    }

    /// 创建记录不存在错误
    pub fn not_found<T: ToString>(msg: T) -> Self {
        Self::NotFound(msg.to_string())
    }

    /// 创建参数校验错误
    pub fn validation<T: ToString>(msg: T) -> Self {
        Self::ValidationError(msg.to_string())
    }

    /// 对建立连接（或者从连接池获取连接）时的错误进行分类
    ///
    /// 服务器拒绝连接、连接池在超时时间内拿不到任何连接时返回 [`DatabaseError::Unreachable`]，
    /// 其余情况统一返回 [`DatabaseError::ConnectionError`]。
    pub fn from_connect(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(io) if io.kind() == ErrorKind::ConnectionRefused => Self::Unreachable(err.to_string()),
            sqlx::Error::PoolTimedOut => Self::Unreachable(err.to_string()),
            _ => Self::ConnectionError(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound("记录不存在".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                Self::Conflict(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                Self::ValidationError(db_err.message().to_string())
            }
            _ => Self::SqlxError(err),
        }
    }
}
