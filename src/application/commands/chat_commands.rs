//! Chat Commands - 问答相关命令

use crate::domain::{AudioArtifact, VoicePreference};

/// 处理一次用户提问命令
#[derive(Debug, Clone)]
pub struct ChatTurnCommand {
    /// 用户问题原文
    pub query: String,
    /// 回答音频的语音偏好
    pub voice: VoicePreference,
}

/// 问答响应
#[derive(Debug, Clone)]
pub struct ChatTurnResponse {
    /// 助手的文本回答
    pub answer: String,
    /// 合成的音频制品；语音侧任何一步失败时为 None
    pub artifact: Option<AudioArtifact>,
    /// 实际使用的语音偏好
    pub voice_used: VoicePreference,
}
