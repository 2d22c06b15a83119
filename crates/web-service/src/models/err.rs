use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::DatabaseError;
use thiserror::Error;
use validator::ValidationErrors;

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据验证错误，这种错误通常都是用户参数不正确导致的，所以需要转换为400
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// 仓库层/服务层错误
    #[error(transparent)]
    RepositoryError(#[from] DatabaseError),
}

impl AppError {
    /// 每一种错误对应的http状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::RepositoryError(err) => match err {
                DatabaseError::ValidationError(_) | DatabaseError::InvalidField(_) => StatusCode::BAD_REQUEST,
                DatabaseError::NotFound(_) => StatusCode::NOT_FOUND,
                DatabaseError::Conflict(_) => StatusCode::CONFLICT,
                DatabaseError::Unreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
                DatabaseError::SqlxError(_) | DatabaseError::ConnectionError(_) | DatabaseError::MigrationError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AppError::ValidationFailed(err) => (status, format!("Validate failed: {err}")).into_response(),
            AppError::RepositoryError(err) => match err {
                DatabaseError::NotFound(msg) => (status, format!("Resource not found: {msg}")).into_response(),
                DatabaseError::ValidationError(msg) => (status, format!("Validation error: {msg}")).into_response(),
                DatabaseError::InvalidField(_) | DatabaseError::Conflict(_) => (status, err.to_string()).into_response(),
                _ => {
                    tracing::error!("❌ 请求处理失败: {err}");
                    (status, format!("Repository error: {err}")).into_response()
                }
            },
        }
    }
}
