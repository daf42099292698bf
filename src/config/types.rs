//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::{SpeechFormat, VoicePreference, VoiceProfile};

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// OAuth 令牌兑换配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 对话补全配置
    #[serde(default)]
    pub chat: ChatConfig,

    /// 语音合成配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 音频清理配置
    #[serde(default)]
    pub cleanup: CleanupConfig,

    /// 上游 TLS 配置
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            chat: ChatConfig::default(),
            speech: SpeechConfig::default(),
            storage: StorageConfig::default(),
            cleanup: CleanupConfig::default(),
            upstream: UpstreamConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 是否启用 CORS（浏览器前端跨域调用时开启）
    #[serde(default = "default_cors_enabled")]
    pub cors_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_cors_enabled(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// OAuth 令牌兑换配置
///
/// 两个上游服务共用同一个授权端点，但各自持有独立的
/// 客户端凭据和 scope。凭据默认值为空，必须通过环境变量
/// 或配置文件注入，启动时校验会拒绝缺失的凭据。
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// 授权端点 URL
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// 令牌请求超时时间（秒）
    #[serde(default = "default_auth_timeout")]
    pub timeout_secs: u64,

    /// 对话服务的 scope
    #[serde(default = "default_chat_scope")]
    pub chat_scope: String,

    /// 合成服务的 scope
    #[serde(default = "default_speech_scope")]
    pub speech_scope: String,

    /// 对话服务客户端 ID
    #[serde(default)]
    pub chat_client_id: String,

    /// 对话服务客户端密钥
    #[serde(default)]
    pub chat_client_secret: String,

    /// 合成服务客户端 ID
    #[serde(default)]
    pub speech_client_id: String,

    /// 合成服务客户端密钥
    #[serde(default)]
    pub speech_client_secret: String,
}

fn default_token_url() -> String {
    "https://ngw.devices.sberbank.ru:9443/api/v2/oauth".to_string()
}

fn default_auth_timeout() -> u64 {
    10
}

fn default_chat_scope() -> String {
    "GIGACHAT_API_PERS".to_string()
}

fn default_speech_scope() -> String {
    "SALUTE_SPEECH_PERS".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
            timeout_secs: default_auth_timeout(),
            chat_scope: default_chat_scope(),
            speech_scope: default_speech_scope(),
            chat_client_id: String::new(),
            chat_client_secret: String::new(),
            speech_client_id: String::new(),
            speech_client_secret: String::new(),
        }
    }
}

/// 对话补全配置
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// 补全端点 URL
    #[serde(default = "default_completions_url")]
    pub completions_url: String,

    /// 模型标识
    #[serde(default = "default_model")]
    pub model: String,

    /// 系统提示词（消息列表的第一条）
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// 采样温度
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 生成上限（token 数）
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// 补全请求超时时间（秒）
    #[serde(default = "default_chat_timeout")]
    pub timeout_secs: u64,
}

fn default_completions_url() -> String {
    "https://gigachat.devices.sberbank.ru/api/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "GigaChat".to_string()
}

fn default_system_prompt() -> String {
    "Ты — голосовой ассистент. Отвечай кратко, дружелюбно и по делу.".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_chat_timeout() -> u64 {
    30
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            completions_url: default_completions_url(),
            model: default_model(),
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_chat_timeout(),
        }
    }
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// 合成端点 URL
    #[serde(default = "default_synthesize_url")]
    pub synthesize_url: String,

    /// 音频输出格式
    /// 可选: wav16, pcm16, opus
    #[serde(default)]
    pub format: SpeechFormat,

    /// 语速
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// 合成请求超时时间（秒）
    #[serde(default = "default_speech_timeout")]
    pub timeout_secs: u64,

    /// 音色映射表
    #[serde(default)]
    pub voices: VoicesConfig,
}

/// 音色映射配置
///
/// 每个偏好对应的供应商音色 ID 与情感标签均可覆盖。
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    /// 男声音色
    #[serde(default = "default_male_profile")]
    pub male: VoiceProfile,

    /// 女声音色
    #[serde(default = "default_female_profile")]
    pub female: VoiceProfile,
}

fn default_synthesize_url() -> String {
    "https://smartspeech.sber.ru/rest/v1/text:synthesize".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_speech_timeout() -> u64 {
    30
}

fn default_male_profile() -> VoiceProfile {
    VoicePreference::Male.default_profile()
}

fn default_female_profile() -> VoiceProfile {
    VoicePreference::Female.default_profile()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            synthesize_url: default_synthesize_url(),
            format: SpeechFormat::default(),
            speed: default_speed(),
            timeout_secs: default_speech_timeout(),
            voices: VoicesConfig::default(),
        }
    }
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            male: default_male_profile(),
            female: default_female_profile(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 音频存储目录
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// 音频保留时长（秒）
    #[serde(default = "default_retention")]
    pub retention_secs: u64,
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("data/audio")
}

fn default_retention() -> u64 {
    3600 // 1 小时
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            retention_secs: default_retention(),
        }
    }
}

/// 音频清理配置
#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    /// 是否启用后台清理
    #[serde(default = "default_cleanup_enabled")]
    pub enabled: bool,

    /// 清理间隔时间（秒）
    #[serde(default = "default_cleanup_interval")]
    pub interval_secs: u64,
}

fn default_cleanup_enabled() -> bool {
    true
}

fn default_cleanup_interval() -> u64 {
    300 // 5 分钟
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: default_cleanup_enabled(),
            interval_secs: default_cleanup_interval(),
        }
    }
}

/// 上游 TLS 配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamConfig {
    /// 跳过上游 TLS 证书校验
    /// 仅限开发环境排查证书链问题时使用，默认关闭
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
