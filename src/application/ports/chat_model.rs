//! Chat Model Port - 对话补全抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::application::ports::token_provider::AccessCredential;

/// 补全错误
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Completion request timeout")]
    Timeout,

    #[error("Completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion response missing message content")]
    MissingContent,
}

/// 一次对话补全请求
///
/// 每个进站请求构造一份，消息列表固定为两条：系统指令 + 用户问题
#[derive(Debug, Clone)]
pub struct ChatQuery {
    /// 用户问题，已去除首尾空白
    pub prompt: String,
    /// 系统指令
    pub system_instructions: String,
    /// 采样温度
    pub temperature: f32,
    /// 生成上限（token 数）
    pub max_tokens: u32,
}

/// Chat Model Port
#[async_trait]
pub trait ChatModelPort: Send + Sync {
    /// 执行一次补全，返回首个候选的文本内容
    async fn complete(
        &self,
        query: &ChatQuery,
        credential: &AccessCredential,
    ) -> Result<String, CompletionError>;
}
