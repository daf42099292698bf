//! Token Provider Port - 凭证交换抽象
//!
//! 定义 client-credentials 交换的抽象接口，具体实现在 infrastructure/adapters/auth

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// 凭证交换错误
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Token exchange timeout")]
    Timeout,

    #[error("Token endpoint returned {status}: {body}")]
    ExchangeFailed { status: u16, body: String },

    #[error("Malformed token response: {0}")]
    MalformedResponse(String),
}

/// 上游服务标识
///
/// 两个上游共用同一个授权端点，按 scope 区分；缓存按此枚举分别持有凭证。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenService {
    /// 对话补全服务
    Chat,
    /// 语音合成服务
    Speech,
}

impl TokenService {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Speech => "speech",
        }
    }
}

impl std::fmt::Display for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 一次凭证交换的结果
#[derive(Debug, Clone)]
pub struct TokenGrant {
    /// 裸 access token，不带 `Bearer ` 前缀（由各适配器在请求头上补齐）
    pub access_token: String,
    /// 上游报告的有效期（秒）
    pub expires_in: u64,
}

/// 缓存中的凭证
///
/// 由 TokenCache 独占持有，刷新时整体替换而不是原地修改。
/// `expires_at` 在构造时已经扣除安全余量。
#[derive(Debug, Clone)]
pub struct AccessCredential {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AccessCredential {
    /// 凭证在给定时刻是否仍然可用
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Token Provider Port
///
/// 每次调用执行一次完整的 client-credentials 交换；缓存逻辑在上层
#[async_trait]
pub trait TokenProviderPort: Send + Sync {
    async fn exchange(&self, service: TokenService) -> Result<TokenGrant, AuthError>;
}
