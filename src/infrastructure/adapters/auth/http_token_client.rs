//! HTTP Token Client - 调用上游授权端点
//!
//! 实现 TokenProviderPort trait，通过 client-credentials 流程换取 access token
//!
//! 授权 API:
//! POST {token_url}
//! Headers: Authorization: Basic base64(client_id:client_secret), RqUID: uuid4
//! Request: scope=<service scope>  (application/x-www-form-urlencoded)
//! Response: {"access_token": "...", "expires_in": 1800}  (JSON)

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::{AuthError, TokenGrant, TokenProviderPort, TokenService};

/// 上游未报告有效期时的兜底值（秒）
const DEFAULT_CHAT_TTL_SECS: u64 = 1800;
const DEFAULT_SPEECH_TTL_SECS: u64 = 3600;

/// 授权响应体
#[derive(Debug, Deserialize)]
struct TokenHttpResponse {
    access_token: String,
    expires_in: Option<u64>,
}

/// 单个服务的接入凭据
#[derive(Debug, Clone, Default)]
pub struct ServiceCredentials {
    pub client_id: String,
    pub client_secret: String,
    /// 授权请求的 scope 参数
    pub scope: String,
}

/// HTTP Token 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTokenClientConfig {
    /// 授权端点 URL，两个服务共用
    pub token_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 跳过上游 TLS 证书校验（仅限开发环境）
    pub accept_invalid_certs: bool,
    pub chat: ServiceCredentials,
    pub speech: ServiceCredentials,
}

impl Default for HttpTokenClientConfig {
    fn default() -> Self {
        Self {
            token_url: "https://ngw.devices.sberbank.ru:9443/api/v2/oauth".to_string(),
            timeout_secs: 10,
            accept_invalid_certs: false,
            chat: ServiceCredentials {
                scope: "GIGACHAT_API_PERS".to_string(),
                ..Default::default()
            },
            speech: ServiceCredentials {
                scope: "SALUTE_SPEECH_PERS".to_string(),
                ..Default::default()
            },
        }
    }
}

/// HTTP Token 客户端
pub struct HttpTokenClient {
    client: Client,
    config: HttpTokenClientConfig,
}

impl HttpTokenClient {
    pub fn new(config: HttpTokenClientConfig) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn credentials(&self, service: TokenService) -> &ServiceCredentials {
        match service {
            TokenService::Chat => &self.config.chat,
            TokenService::Speech => &self.config.speech,
        }
    }

    fn fallback_ttl(service: TokenService) -> u64 {
        match service {
            TokenService::Chat => DEFAULT_CHAT_TTL_SECS,
            TokenService::Speech => DEFAULT_SPEECH_TTL_SECS,
        }
    }
}

/// 构造 Basic 认证头的值
fn basic_authorization(credentials: &ServiceCredentials) -> String {
    let raw = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(raw)
    )
}

#[async_trait]
impl TokenProviderPort for HttpTokenClient {
    async fn exchange(&self, service: TokenService) -> Result<TokenGrant, AuthError> {
        let credentials = self.credentials(service);

        tracing::debug!(
            url = %self.config.token_url,
            service = %service,
            scope = %credentials.scope,
            "Exchanging client credentials"
        );

        // RqUID 每次请求必须唯一
        let response = self
            .client
            .post(&self.config.token_url)
            .header("Authorization", basic_authorization(credentials))
            .header("RqUID", Uuid::new_v4().to_string())
            .header("Accept", "application/json")
            .form(&[("scope", credentials.scope.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AuthError::Timeout
                } else if e.is_connect() {
                    AuthError::NetworkError(format!("Cannot connect to token endpoint: {}", e))
                } else {
                    AuthError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::ExchangeFailed {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenHttpResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        let expires_in = token.expires_in.unwrap_or_else(|| Self::fallback_ttl(service));

        tracing::info!(service = %service, expires_in = expires_in, "Token exchanged");

        Ok(TokenGrant {
            access_token: token.access_token,
            expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpTokenClientConfig::default();
        assert_eq!(config.timeout_secs, 10);
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.chat.scope, "GIGACHAT_API_PERS");
        assert_eq!(config.speech.scope, "SALUTE_SPEECH_PERS");
    }

    #[test]
    fn test_basic_authorization_encoding() {
        let credentials = ServiceCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            scope: String::new(),
        };
        // base64("id:secret")
        assert_eq!(basic_authorization(&credentials), "Basic aWQ6c2VjcmV0");
    }

    #[test]
    fn test_credentials_selected_by_service() {
        let mut config = HttpTokenClientConfig::default();
        config.chat.client_id = "chat-id".to_string();
        config.speech.client_id = "speech-id".to_string();
        let client = HttpTokenClient::new(config).unwrap();

        assert_eq!(client.credentials(TokenService::Chat).client_id, "chat-id");
        assert_eq!(
            client.credentials(TokenService::Speech).client_id,
            "speech-id"
        );
    }

    #[test]
    fn test_fallback_ttl_per_service() {
        assert_eq!(HttpTokenClient::fallback_ttl(TokenService::Chat), 1800);
        assert_eq!(HttpTokenClient::fallback_ttl(TokenService::Speech), 3600);
    }

    #[test]
    fn test_token_response_parses_without_expiry() {
        let parsed: TokenHttpResponse =
            serde_json::from_str(r#"{"access_token": "tok"}"#).unwrap();
        assert_eq!(parsed.access_token, "tok");
        assert!(parsed.expires_in.is_none());
    }
}
