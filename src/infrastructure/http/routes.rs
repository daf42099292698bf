//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/chat/text      POST  一次问答（文本回答 + 可选音频链接）
//! - /api/health         GET   健康检查
//! - /audio/{file}       GET   下载合成音频（{32位十六进制}.wav）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/audio/:file", get(handlers::download_audio))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/chat", chat_routes())
}

/// Chat 路由
fn chat_routes() -> Router<Arc<AppState>> {
    Router::new().route("/text", post(handlers::chat_text))
}
