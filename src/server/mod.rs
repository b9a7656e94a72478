// src/server/mod.rs

mod error;
mod handlers;

use crate::{error::AppResult, jobs::JobRunner};
use axum::{Router, routing::get};
use log::info;

/// 所有处理函数共享的状态
#[derive(Clone)]
pub struct AppState {
    pub runner: JobRunner,
    /// 为 true 时 `/get_layer_two_data` 直接返回结果，不走轮询
    pub synchronous: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/get_layer_two_data", get(handlers::get_layer_two_data))
        .route("/get_status", get(handlers::get_status))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

pub async fn serve(state: AppState, host: &str, port: u16) -> AppResult<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(
        "服务已启动: http://{} ({})",
        listener.local_addr()?,
        if state.synchronous { "同步模式" } else { "轮询模式" }
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // 无法监听信号时一直运行
        std::future::pending::<()>().await;
    }
    info!("收到中断信号，正在停止服务...");
}
