//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ChatTurnConfig,
    ChatTurnHandler,
    // Query handlers
    GetArtifactHandler,
    // Ports
    ArtifactStorePort,
    ChatModelPort,
    SpeechSynthesizerPort,
    TokenCache,
};

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub chat_turn_handler: ChatTurnHandler,

    // ========== Query Handlers ==========
    pub get_artifact_handler: GetArtifactHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        chat_turn_config: ChatTurnConfig,
        token_cache: Arc<TokenCache>,
        chat_model: Arc<dyn ChatModelPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        artifact_store: Arc<dyn ArtifactStorePort>,
    ) -> Self {
        Self {
            // Command handlers
            chat_turn_handler: ChatTurnHandler::new(
                chat_turn_config,
                token_cache,
                chat_model,
                synthesizer,
                artifact_store.clone(),
            ),

            // Query handlers
            get_artifact_handler: GetArtifactHandler::new(artifact_store),
        }
    }
}
