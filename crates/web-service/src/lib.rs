//! Web服务模块
//!
//! 提供 HTTP API 接口和文档服务

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use database::Database;
use services::{
    ProjectCommentService, ProjectCommentServiceTrait, ProjectService, ProjectServiceTrait, UserService,
    UserServiceTrait,
};
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::info;

pub mod models;
pub mod routes;
pub mod services;

/// 应用共享状态
///
/// 路由函数只通过 trait 对象访问服务，测试时可以换成内存中的实现。
#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub comment_service: Arc<dyn ProjectCommentServiceTrait>,
}

impl AppState {
    /// 使用数据库实现的服务构建共享状态
    pub fn new(database: Database) -> Self {
        Self {
            project_service: Arc::new(ProjectService::new(database.clone())),
            user_service: Arc::new(UserService::new(database.clone())),
            comment_service: Arc::new(ProjectCommentService::new(database)),
        }
    }
}

/// 启动 Web 服务
///
/// 收到 `shutdown_rx` 的通知后停止接收新连接，等待处理中的请求结束后返回。
pub async fn start_web_service(database: Database, bind_addr: &str, mut shutdown_rx: Receiver<bool>) -> Result<()> {
    let router = routes::create_app_router(AppState::new(database));

    info!("🚀 启动 Web Service 在 {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .wrap_err_with(|| format!("无法监听地址 {bind_addr}"))?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            // 发送端被丢弃同样视为关闭信号
            let _ = shutdown_rx.changed().await;
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}
