//! HTTP Speech Client - 调用上游语音合成服务
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 合成 API:
//! POST {synthesize_url}?format=wav16&voice=...&emotion=...&speed=1
//! Request: 纯文本请求体 (Content-Type: application/text)
//! Response: 音频二进制

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{
    AccessCredential, SpeechSynthesizerPort, SynthesisError, SynthesisRequest,
};
use crate::domain::{SpeechFormat, VoicePreference, VoiceProfile};

/// HTTP Speech 客户端配置
#[derive(Debug, Clone)]
pub struct HttpSpeechClientConfig {
    /// 合成端点 URL
    pub synthesize_url: String,
    /// 音频输出格式
    pub format: SpeechFormat,
    /// 语速
    pub speed: f32,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 跳过上游 TLS 证书校验（仅限开发环境）
    pub accept_invalid_certs: bool,
    /// 男声音色
    pub male_voice: VoiceProfile,
    /// 女声音色
    pub female_voice: VoiceProfile,
}

impl Default for HttpSpeechClientConfig {
    fn default() -> Self {
        Self {
            synthesize_url: "https://smartspeech.sber.ru/rest/v1/text:synthesize".to_string(),
            format: SpeechFormat::Wav16,
            speed: 1.0,
            timeout_secs: 30,
            accept_invalid_certs: false,
            male_voice: VoicePreference::Male.default_profile(),
            female_voice: VoicePreference::Female.default_profile(),
        }
    }
}

/// HTTP Speech 客户端
pub struct HttpSpeechClient {
    client: Client,
    config: HttpSpeechClientConfig,
}

impl HttpSpeechClient {
    pub fn new(config: HttpSpeechClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| SynthesisError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 语音偏好到具体音色的映射
    fn profile(&self, voice: VoicePreference) -> &VoiceProfile {
        match voice {
            VoicePreference::Male => &self.config.male_voice,
            VoicePreference::Female => &self.config.female_voice,
        }
    }

    fn build_query(&self, voice: VoicePreference) -> Vec<(&'static str, String)> {
        let profile = self.profile(voice);
        vec![
            ("format", self.config.format.as_param().to_string()),
            ("voice", profile.voice.clone()),
            ("emotion", profile.emotion.clone()),
            // 全精度输出，固定一位小数会把 1.25 舍入成 1.2
            ("speed", self.config.speed.to_string()),
        ]
    }
}

#[async_trait]
impl SpeechSynthesizerPort for HttpSpeechClient {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        credential: &AccessCredential,
    ) -> Result<Vec<u8>, SynthesisError> {
        let query = self.build_query(request.voice);

        tracing::debug!(
            url = %self.config.synthesize_url,
            voice = %request.voice,
            text_len = request.text.chars().count(),
            "Sending synthesis request"
        );

        // 文本作为原始请求体发送，不做 JSON 包装
        let response = self
            .client
            .post(&self.config.synthesize_url)
            .bearer_auth(&credential.token)
            .header("Content-Type", "application/text")
            .query(&query)
            .body(request.text.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::NetworkError(format!(
                        "Cannot connect to synthesis service: {}",
                        e
                    ))
                } else {
                    SynthesisError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::NetworkError(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(audio_size = audio.len(), voice = %request.voice, "Synthesis completed");

        Ok(audio)
    }
}
