//! Chat Command Handlers

use std::sync::Arc;

use crate::application::commands::chat_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtifactStorePort, ChatModelPort, ChatQuery, SpeechSynthesizerPort, SynthesisRequest,
    TokenService,
};
use crate::application::token_cache::TokenCache;
use crate::domain::{sanitize_for_speech, AudioArtifact, SanitizeConfig, VoicePreference};

/// 日志中截断长文本的上限（字符）
const LOG_PREVIEW_CHARS: usize = 100;

/// ChatTurn Handler 配置
#[derive(Debug, Clone)]
pub struct ChatTurnConfig {
    /// 系统指令，固定作为消息列表的第一条
    pub system_instructions: String,
    /// 采样温度
    pub temperature: f32,
    /// 生成上限（token 数）
    pub max_tokens: u32,
    /// 合成文本净化配置
    pub sanitize: SanitizeConfig,
}

impl Default for ChatTurnConfig {
    fn default() -> Self {
        Self {
            system_instructions:
                "Ты — голосовой ассистент. Отвечай кратко, дружелюбно и по делу.".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            sanitize: SanitizeConfig::default(),
        }
    }
}

/// ChatTurn Handler - 处理一次完整的问答
///
/// 对话侧失败对整个请求是致命的；语音侧（凭证、合成、落盘）任何一步
/// 失败都降级为"仅文本回答"，不影响请求成功。
pub struct ChatTurnHandler {
    config: ChatTurnConfig,
    token_cache: Arc<TokenCache>,
    chat_model: Arc<dyn ChatModelPort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    artifact_store: Arc<dyn ArtifactStorePort>,
}

impl ChatTurnHandler {
    pub fn new(
        config: ChatTurnConfig,
        token_cache: Arc<TokenCache>,
        chat_model: Arc<dyn ChatModelPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        artifact_store: Arc<dyn ArtifactStorePort>,
    ) -> Self {
        Self {
            config,
            token_cache,
            chat_model,
            synthesizer,
            artifact_store,
        }
    }

    pub async fn handle(&self, cmd: ChatTurnCommand) -> Result<ChatTurnResponse, ApplicationError> {
        let prompt = cmd.query.trim();
        if prompt.is_empty() {
            return Err(ApplicationError::validation("Query must not be empty"));
        }

        tracing::info!(
            query = %preview(prompt),
            voice = %cmd.voice,
            "Handling chat turn"
        );

        // 对话侧：凭证获取和补全失败都直接向上传播
        let chat_credential = self.token_cache.token(TokenService::Chat).await?;
        let query = ChatQuery {
            prompt: prompt.to_string(),
            system_instructions: self.config.system_instructions.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };
        let answer = self.chat_model.complete(&query, &chat_credential).await?;

        tracing::info!(answer = %preview(&answer), "Completion received");

        // 语音侧：从这里开始不再致命
        let artifact = self.synthesize_answer(&answer, cmd.voice).await;

        Ok(ChatTurnResponse {
            answer,
            artifact,
            voice_used: cmd.voice,
        })
    }

    /// 合成回答音频并落盘；所有失败降级为无音频
    async fn synthesize_answer(
        &self,
        answer: &str,
        voice: VoicePreference,
    ) -> Option<AudioArtifact> {
        let text = sanitize_for_speech(answer, &self.config.sanitize);
        if text.is_empty() {
            tracing::warn!("Sanitized answer is empty, skipping synthesis");
            return None;
        }

        let credential = match self.token_cache.token(TokenService::Speech).await {
            Ok(credential) => credential,
            Err(e) => {
                tracing::error!(error = %e, "Speech credential fetch failed, answering without audio");
                return None;
            }
        };

        let request = SynthesisRequest { text, voice };
        let audio = match self.synthesizer.synthesize(&request, &credential).await {
            Ok(audio) => audio,
            Err(e) => {
                tracing::error!(error = %e, "Synthesis failed, answering without audio");
                return None;
            }
        };

        match self.artifact_store.save(audio).await {
            Ok(artifact) => {
                tracing::info!(artifact_id = %artifact.id, "Audio artifact stored");
                Some(artifact)
            }
            Err(e) => {
                tracing::error!(error = %e, "Artifact store failed, answering without audio");
                None
            }
        }
    }
}

/// 取前若干字符用于日志，避免整段回答刷屏
fn preview(text: &str) -> String {
    if text.chars().count() <= LOG_PREVIEW_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}
