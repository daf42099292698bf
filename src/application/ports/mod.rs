//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artifact_store;
mod chat_model;
mod speech_synthesizer;
mod token_provider;

pub use artifact_store::{ArtifactStorePort, StoreError, StoredArtifact, SweepOutcome};
pub use chat_model::{ChatModelPort, ChatQuery, CompletionError};
pub use speech_synthesizer::{SpeechSynthesizerPort, SynthesisError, SynthesisRequest};
pub use token_provider::{
    AccessCredential, AuthError, TokenGrant, TokenProviderPort, TokenService,
};
