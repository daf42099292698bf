//! Speech Synthesizer Port - 语音合成抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::application::ports::token_provider::AccessCredential;
use crate::domain::VoicePreference;

/// 合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Synthesis request timeout")]
    Timeout,

    #[error("Synthesis endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// 一次合成请求
///
/// `text` 必须是已净化的非空文本；语音偏好到具体音色的映射由适配器完成
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: VoicePreference,
}

/// Speech Synthesizer Port
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 合成音频，返回完整的音频字节
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        credential: &AccessCredential,
    ) -> Result<Vec<u8>, SynthesisError>;
}
