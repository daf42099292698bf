//! Token 缓存
//!
//! 每个上游服务最多缓存一份凭证。凭证新鲜时直接返回且不产生网络调用，
//! 过期后通过端口执行一次交换并整体替换。并发的过期观察者可能各自触发
//! 刷新，交换是幂等的，最后一次写入生效，因此不做额外串行化。

use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;

use crate::application::ports::{AccessCredential, AuthError, TokenProviderPort, TokenService};

/// 默认安全余量（秒）：凭证视为提前这么多秒过期，
/// 避免拿到一个会在上游请求中途失效的 token
pub const DEFAULT_SAFETY_MARGIN_SECS: i64 = 300;

/// `expires_in` 的上限（秒），取一年。上游颁发的 TTL 以分钟或小时计，
/// 超大数值会使 chrono 的时长构造与时间加法越界
const MAX_TTL_SECS: u64 = 31_536_000;

/// 凭证缓存
pub struct TokenCache {
    provider: Arc<dyn TokenProviderPort>,
    credentials: DashMap<TokenService, AccessCredential>,
    safety_margin: Duration,
}

impl TokenCache {
    pub fn new(provider: Arc<dyn TokenProviderPort>) -> Self {
        Self::with_safety_margin(provider, Duration::seconds(DEFAULT_SAFETY_MARGIN_SECS))
    }

    pub fn with_safety_margin(provider: Arc<dyn TokenProviderPort>, safety_margin: Duration) -> Self {
        Self {
            provider,
            credentials: DashMap::new(),
            safety_margin,
        }
    }

    /// 获取指定服务的有效凭证
    ///
    /// 缓存命中时零网络调用；未命中或已过期时执行一次交换
    pub async fn token(&self, service: TokenService) -> Result<AccessCredential, AuthError> {
        let now = Utc::now();
        if let Some(cached) = self.credentials.get(&service) {
            if cached.is_fresh(now) {
                tracing::debug!(service = %service, "Token cache hit");
                return Ok(cached.clone());
            }
        }

        tracing::debug!(service = %service, "Token cache miss, exchanging credentials");
        let grant = self.provider.exchange(service).await?;

        let issued_at = Utc::now();
        let ttl_secs = grant.expires_in.min(MAX_TTL_SECS) as i64;
        let credential = AccessCredential {
            token: grant.access_token,
            issued_at,
            expires_at: issued_at + Duration::seconds(ttl_secs) - self.safety_margin,
        };
        tracing::info!(
            service = %service,
            expires_at = %credential.expires_at,
            "Token refreshed"
        );

        self.credentials.insert(service, credential.clone());
        Ok(credential)
    }
}
