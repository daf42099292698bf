//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::VoicePreference;

// ============================================================================
// Chat DTOs
// ============================================================================

/// 问答请求
#[derive(Debug, Deserialize)]
pub struct ChatTextRequest {
    /// 用户问题；字段缺失按空串处理，走同一条 400 校验路径
    #[serde(default)]
    pub query: String,
    /// 语音偏好，缺省为男声
    #[serde(default)]
    pub voice: Option<VoicePreference>,
}

/// 问答响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTextResponse {
    pub text_response: String,
    /// 音频下载地址；语音侧失败时为 null
    pub audio_url: Option<String>,
    /// 响应生成时间 (RFC 3339)
    pub timestamp: String,
    pub voice_used: String,
}

// ============================================================================
// Health DTOs
// ============================================================================

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub services: ServicesStatus,
}

/// 上游服务配置状态（静态，不发起探测请求）
#[derive(Debug, Serialize)]
pub struct ServicesStatus {
    pub chat: &'static str,
    pub speech: &'static str,
}
