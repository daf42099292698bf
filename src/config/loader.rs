//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `GOVORUN_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `GOVORUN_SERVER__HOST=127.0.0.1`
/// - `GOVORUN_SERVER__PORT=8080`
/// - `GOVORUN_AUTH__CHAT_CLIENT_ID=...`
/// - `GOVORUN_AUTH__CHAT_CLIENT_SECRET=...`
/// - `GOVORUN_AUTH__SPEECH_CLIENT_ID=...`
/// - `GOVORUN_AUTH__SPEECH_CLIENT_SECRET=...`
///
/// # 返回
/// - `Ok(AppConfig)` - 成功加载的配置
/// - `Err(ConfigError)` - 加载失败
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("server.cors_enabled", true)?
        .set_default("auth.token_url", "https://ngw.devices.sberbank.ru:9443/api/v2/oauth")?
        .set_default("auth.timeout_secs", 10)?
        .set_default("auth.chat_scope", "GIGACHAT_API_PERS")?
        .set_default("auth.speech_scope", "SALUTE_SPEECH_PERS")?
        .set_default(
            "chat.completions_url",
            "https://gigachat.devices.sberbank.ru/api/v1/chat/completions",
        )?
        .set_default("chat.model", "GigaChat")?
        .set_default("chat.temperature", 0.7)?
        .set_default("chat.max_tokens", 500)?
        .set_default("chat.timeout_secs", 30)?
        .set_default("speech.synthesize_url", "https://smartspeech.sber.ru/rest/v1/text:synthesize")?
        .set_default("speech.speed", 1.0)?
        .set_default("speech.timeout_secs", 30)?
        .set_default("storage.audio_dir", "data/audio")?
        .set_default("storage.retention_secs", 3600)?
        .set_default("cleanup.enabled", true)?
        .set_default("cleanup.interval_secs", 300)?
        .set_default("upstream.accept_invalid_certs", false)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: GOVORUN_
    // 层级分隔符: __ (双下划线)
    // 例如: GOVORUN_AUTH__CHAT_CLIENT_ID=abc123
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("GOVORUN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
///
/// 凭据只能通过环境变量或配置文件注入，缺失时启动即失败，
/// 避免带着空凭据向授权端点发请求。
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证端口范围
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 验证上游端点
    if config.auth.token_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Token URL cannot be empty".to_string(),
        ));
    }
    if config.chat.completions_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Chat completions URL cannot be empty".to_string(),
        ));
    }
    if config.speech.synthesize_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Speech synthesize URL cannot be empty".to_string(),
        ));
    }

    // 验证客户端凭据
    if config.auth.chat_client_id.is_empty() || config.auth.chat_client_secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "Chat credentials missing: set GOVORUN_AUTH__CHAT_CLIENT_ID and \
             GOVORUN_AUTH__CHAT_CLIENT_SECRET"
                .to_string(),
        ));
    }
    if config.auth.speech_client_id.is_empty() || config.auth.speech_client_secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "Speech credentials missing: set GOVORUN_AUTH__SPEECH_CLIENT_ID and \
             GOVORUN_AUTH__SPEECH_CLIENT_SECRET"
                .to_string(),
        ));
    }

    // 验证模型与合成参数范围
    if !(0.0..=2.0).contains(&config.chat.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "Chat temperature must be within [0.0, 2.0], got {}",
            config.chat.temperature
        )));
    }
    if config.chat.max_tokens == 0 {
        return Err(ConfigError::ValidationError(
            "Chat max_tokens cannot be 0".to_string(),
        ));
    }
    if !(0.5..=2.0).contains(&config.speech.speed) {
        return Err(ConfigError::ValidationError(format!(
            "Speech speed must be within [0.5, 2.0], got {}",
            config.speech.speed
        )));
    }

    // 验证清理配置
    if config.cleanup.enabled && config.cleanup.interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Cleanup interval cannot be 0 when cleanup is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
///
/// 凭据永不输出。
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("CORS Enabled: {}", config.server.cors_enabled);
    tracing::info!("Token URL: {}", config.auth.token_url);
    tracing::info!("Chat URL: {}", config.chat.completions_url);
    tracing::info!("Chat Model: {}", config.chat.model);
    tracing::info!("Speech URL: {}", config.speech.synthesize_url);
    tracing::info!("Audio Directory: {:?}", config.storage.audio_dir);
    tracing::info!("Audio Retention: {}s", config.storage.retention_secs);
    tracing::info!("Cleanup Enabled: {}", config.cleanup.enabled);
    if config.cleanup.enabled {
        tracing::info!("Cleanup Interval: {}s", config.cleanup.interval_secs);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
    if config.upstream.accept_invalid_certs {
        tracing::warn!("Upstream TLS certificate verification is disabled");
    }
}
