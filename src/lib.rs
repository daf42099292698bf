//! Govorun - 语音对话网关
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Artifact: 音频制品标识与元数据
//! - Voice: 语音偏好与供应商音色映射
//! - Sanitizer: 合成文本净化规则
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TokenProvider, ChatModel, SpeechSynthesizer, ArtifactStore）
//! - TokenCache: 按服务缓存 OAuth 令牌，带安全余量
//! - Commands: 对话回合编排（补全 + 合成 + 落盘）
//! - Queries: 音频制品查询
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（对话、音频下载、健康检查）
//! - Adapters: OAuth 令牌兑换、对话补全、语音合成、文件存储
//! - Worker: 过期音频后台清理

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
