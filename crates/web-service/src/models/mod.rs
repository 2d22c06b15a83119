//! HTTP 接口的请求/响应模型
//!
//! 这里的结构体只负责和外部交互（参数反序列化、校验、OpenAPI文档），
//! 再转换为 [`database`] crate 中的模型交给服务层处理。

pub mod comments;
pub mod err;
pub mod projects;
pub mod users;
