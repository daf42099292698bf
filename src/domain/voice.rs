//! 语音选择 - Value Objects
//!
//! 调用方只表达偏好（male/female），供应商侧的音色 ID 和情感标签
//! 通过固定映射表解析，两行均可被配置覆盖。

use serde::{Deserialize, Serialize};

/// 调用方的语音偏好
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoicePreference {
    Male,
    Female,
}

impl Default for VoicePreference {
    fn default() -> Self {
        // 请求未携带 voice 字段时回落到男声
        Self::Male
    }
}

impl VoicePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// 默认音色映射表
    pub fn default_profile(&self) -> VoiceProfile {
        match self {
            Self::Male => VoiceProfile::new("Dmitry_24000", "neutral"),
            Self::Female => VoiceProfile::new("May_24000", "friendly"),
        }
    }
}

impl std::fmt::Display for VoicePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 供应商侧音色描述
///
/// `voice` 是供应商的音色标识（如 `May_24000`，24000 为采样率），
/// `emotion` 是该音色的情感标签。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub voice: String,
    pub emotion: String,
}

impl VoiceProfile {
    pub fn new(voice: impl Into<String>, emotion: impl Into<String>) -> Self {
        Self {
            voice: voice.into(),
            emotion: emotion.into(),
        }
    }
}

/// 合成输出格式（供应商查询参数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechFormat {
    Wav16,
    Pcm16,
    Opus,
}

impl Default for SpeechFormat {
    fn default() -> Self {
        Self::Wav16
    }
}

impl SpeechFormat {
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Wav16 => "wav16",
            Self::Pcm16 => "pcm16",
            Self::Opus => "opus",
        }
    }
}
