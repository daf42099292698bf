//! Artifact Store Port - 音频制品存储抽象

use async_trait::async_trait;
use chrono::Duration;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{ArtifactId, AudioArtifact};

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 已落盘制品的定位信息，供下载侧直接打开文件流式返回
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// 一次清理的统计
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepOutcome {
    /// 删除的制品数
    pub removed: u64,
    /// 仍在保留窗口内的制品数
    pub retained: u64,
}

/// Artifact Store Port
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// 保存音频字节，分配新标识并返回制品描述
    async fn save(&self, audio: Vec<u8>) -> Result<AudioArtifact, StoreError>;

    /// 按标识定位制品；不存在时返回 NotFound
    async fn resolve(&self, id: &ArtifactId) -> Result<StoredArtifact, StoreError>;

    /// 删除落盘时间早于保留窗口的制品
    async fn sweep(&self, retention: Duration) -> Result<SweepOutcome, StoreError>;
}
