//! Govorun - 语音对话网关
//!
//! 请求编排：对话补全 + 语音合成 + 音频落盘
//! - Domain: artifact / voice / sanitizer
//! - Application: commands, queries, ports, token cache
//! - Infrastructure: http, adapters, worker

use std::sync::Arc;

use govorun::application::{ChatTurnConfig, TokenCache};
use govorun::config::{load_config, print_config};
use govorun::domain::SanitizeConfig;
use govorun::infrastructure::adapters::{
    FileArtifactStore, HttpChatClient, HttpChatClientConfig, HttpSpeechClient,
    HttpSpeechClientConfig, HttpTokenClient, HttpTokenClientConfig, ServiceCredentials,
};
use govorun::infrastructure::http::{AppState, HttpServer, ServerConfig};
use govorun::infrastructure::worker::{CleanupWorker, CleanupWorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},govorun={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Govorun - 语音对话网关");
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.storage.audio_dir).await?;

    // 创建令牌兑换客户端与缓存
    let token_config = HttpTokenClientConfig {
        token_url: config.auth.token_url.clone(),
        timeout_secs: config.auth.timeout_secs,
        accept_invalid_certs: config.upstream.accept_invalid_certs,
        chat: ServiceCredentials {
            client_id: config.auth.chat_client_id.clone(),
            client_secret: config.auth.chat_client_secret.clone(),
            scope: config.auth.chat_scope.clone(),
        },
        speech: ServiceCredentials {
            client_id: config.auth.speech_client_id.clone(),
            client_secret: config.auth.speech_client_secret.clone(),
            scope: config.auth.speech_scope.clone(),
        },
    };
    let token_client = Arc::new(
        HttpTokenClient::new(token_config)
            .map_err(|e| anyhow::anyhow!("Failed to init token client: {}", e))?,
    );
    let token_cache = Arc::new(TokenCache::new(token_client));

    // 创建对话补全客户端
    let chat_config = HttpChatClientConfig {
        completions_url: config.chat.completions_url.clone(),
        model: config.chat.model.clone(),
        timeout_secs: config.chat.timeout_secs,
        accept_invalid_certs: config.upstream.accept_invalid_certs,
    };
    let chat_model = Arc::new(
        HttpChatClient::new(chat_config)
            .map_err(|e| anyhow::anyhow!("Failed to init chat client: {}", e))?,
    );

    // 创建语音合成客户端
    let speech_config = HttpSpeechClientConfig {
        synthesize_url: config.speech.synthesize_url.clone(),
        format: config.speech.format,
        speed: config.speech.speed,
        timeout_secs: config.speech.timeout_secs,
        accept_invalid_certs: config.upstream.accept_invalid_certs,
        male_voice: config.speech.voices.male.clone(),
        female_voice: config.speech.voices.female.clone(),
    };
    let synthesizer = Arc::new(
        HttpSpeechClient::new(speech_config)
            .map_err(|e| anyhow::anyhow!("Failed to init speech client: {}", e))?,
    );

    // 创建音频制品存储
    let artifact_store = Arc::new(
        FileArtifactStore::new(&config.storage.audio_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to init artifact store: {}", e))?,
    );

    // 启动清理 Worker（第一个 tick 立即触发，兼作启动时的清理）
    if config.cleanup.enabled {
        let worker_config = CleanupWorkerConfig {
            retention_secs: config.storage.retention_secs,
            interval_secs: config.cleanup.interval_secs,
        };
        let worker = CleanupWorker::new(worker_config, artifact_store.clone());
        tokio::spawn(worker.run());
    }

    // 创建 HTTP 服务器
    let chat_turn_config = ChatTurnConfig {
        system_instructions: config.chat.system_prompt.clone(),
        temperature: config.chat.temperature,
        max_tokens: config.chat.max_tokens,
        sanitize: SanitizeConfig::default(),
    };
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    server_config.cors_enabled = config.server.cors_enabled;

    let state = AppState::new(
        chat_turn_config,
        token_cache,
        chat_model,
        synthesizer,
        artifact_store,
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
