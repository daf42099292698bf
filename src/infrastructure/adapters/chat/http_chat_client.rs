//! HTTP Chat Client - 调用上游对话补全服务
//!
//! 实现 ChatModelPort trait
//!
//! 补全 API:
//! POST {completions_url}
//! Request: {"model": "...", "messages": [...], "temperature": ..., "max_tokens": ..., "stream": false}
//! Response: {"choices": [{"message": {"role": "assistant", "content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{AccessCredential, ChatModelPort, ChatQuery, CompletionError};

/// 补全请求体 (JSON)
#[derive(Debug, Serialize)]
struct ChatHttpRequest<'a> {
    model: &'a str,
    messages: Vec<ChatHttpMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatHttpMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// 补全响应体
#[derive(Debug, Deserialize)]
struct ChatHttpResponse {
    #[serde(default)]
    choices: Vec<ChatHttpChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatHttpChoice {
    message: ChatHttpChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatHttpChoiceMessage {
    content: Option<String>,
}

/// HTTP Chat 客户端配置
#[derive(Debug, Clone)]
pub struct HttpChatClientConfig {
    /// 补全端点 URL
    pub completions_url: String,
    /// 模型标识
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 跳过上游 TLS 证书校验（仅限开发环境）
    pub accept_invalid_certs: bool,
}

impl Default for HttpChatClientConfig {
    fn default() -> Self {
        Self {
            completions_url: "https://gigachat.devices.sberbank.ru/api/v1/chat/completions"
                .to_string(),
            model: "GigaChat".to_string(),
            timeout_secs: 30,
            accept_invalid_certs: false,
        }
    }
}

/// HTTP Chat 客户端
pub struct HttpChatClient {
    client: Client,
    config: HttpChatClientConfig,
}

impl HttpChatClient {
    pub fn new(config: HttpChatClientConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| CompletionError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 构造消息列表：固定两条，系统指令在前
    fn build_body<'a>(&'a self, query: &'a ChatQuery) -> ChatHttpRequest<'a> {
        ChatHttpRequest {
            model: &self.config.model,
            messages: vec![
                ChatHttpMessage {
                    role: "system",
                    content: &query.system_instructions,
                },
                ChatHttpMessage {
                    role: "user",
                    content: &query.prompt,
                },
            ],
            temperature: query.temperature,
            max_tokens: query.max_tokens,
            stream: false,
        }
    }
}

/// 从响应中提取首个候选的文本
fn extract_content(response: ChatHttpResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::MissingContent)
}

#[async_trait]
impl ChatModelPort for HttpChatClient {
    async fn complete(
        &self,
        query: &ChatQuery,
        credential: &AccessCredential,
    ) -> Result<String, CompletionError> {
        let body = self.build_body(query);

        tracing::debug!(
            url = %self.config.completions_url,
            model = %self.config.model,
            prompt_len = query.prompt.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.config.completions_url)
            .bearer_auth(&credential.token)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else if e.is_connect() {
                    CompletionError::NetworkError(format!(
                        "Cannot connect to completion service: {}",
                        e
                    ))
                } else {
                    CompletionError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: ChatHttpResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::NetworkError(format!("Invalid response body: {}", e)))?;

        let content = extract_content(decoded)?;

        tracing::info!(answer_len = content.len(), "Completion received");

        Ok(content)
    }
}
