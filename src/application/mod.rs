//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TokenProvider、ChatModel、SpeechSynthesizer、ArtifactStore）
//! - token_cache: 上游凭证缓存
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod token_cache;

// Re-exports
pub use commands::{
    // Chat commands
    ChatTurnCommand,
    ChatTurnResponse,
    // Handlers
    handlers::{ChatTurnConfig, ChatTurnHandler},
};

pub use error::ApplicationError;

pub use ports::{
    // Token provider
    AccessCredential,
    AuthError,
    TokenGrant,
    TokenProviderPort,
    TokenService,
    // Chat model
    ChatModelPort,
    ChatQuery,
    CompletionError,
    // Speech synthesizer
    SpeechSynthesizerPort,
    SynthesisError,
    SynthesisRequest,
    // Artifact store
    ArtifactStorePort,
    StoreError,
    StoredArtifact,
    SweepOutcome,
};

pub use queries::{
    // Artifact queries
    GetArtifactQuery,
    GetArtifactResponse,
    // Handlers
    handlers::GetArtifactHandler,
};

pub use token_cache::TokenCache;
