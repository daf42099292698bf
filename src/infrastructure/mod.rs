//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod http;
pub mod worker;

pub use adapters::{
    FileArtifactStore, HttpChatClient, HttpChatClientConfig, HttpSpeechClient,
    HttpSpeechClientConfig, HttpTokenClient, HttpTokenClientConfig, ServiceCredentials,
};
pub use worker::{CleanupWorker, CleanupWorkerConfig};
