//! Cleanup Worker - Background Artifact Sweeper

use chrono::Duration;
use std::sync::Arc;
use tokio::time::interval;

use crate::application::ports::ArtifactStorePort;

/// Worker 配置
#[derive(Debug, Clone)]
pub struct CleanupWorkerConfig {
    /// 制品保留时长（秒）
    pub retention_secs: u64,
    /// 清理间隔（秒）
    pub interval_secs: u64,
}

impl Default for CleanupWorkerConfig {
    fn default() -> Self {
        Self {
            retention_secs: 3600,
            interval_secs: 300,
        }
    }
}

/// 清理 Worker
///
/// 周期性扫描制品存储，删除超过保留窗口的音频文件
pub struct CleanupWorker {
    config: CleanupWorkerConfig,
    artifact_store: Arc<dyn ArtifactStorePort>,
}

impl CleanupWorker {
    pub fn new(config: CleanupWorkerConfig, artifact_store: Arc<dyn ArtifactStorePort>) -> Self {
        Self {
            config,
            artifact_store,
        }
    }

    /// 启动 Worker
    ///
    /// 第一个 tick 立即触发，兼作启动时的清理
    pub async fn run(self) {
        tracing::info!(
            retention_secs = self.config.retention_secs,
            interval_secs = self.config.interval_secs,
            "CleanupWorker started"
        );

        let mut ticker = interval(std::time::Duration::from_secs(self.config.interval_secs));
        loop {
            ticker.tick().await;
            self.sweep_once().await;
        }
    }

    async fn sweep_once(&self) {
        let retention = Duration::seconds(self.config.retention_secs as i64);
        match self.artifact_store.sweep(retention).await {
            Ok(outcome) => {
                if outcome.removed > 0 {
                    tracing::info!(
                        removed = outcome.removed,
                        retained = outcome.retained,
                        "Expired artifacts removed"
                    );
                } else {
                    tracing::debug!(retained = outcome.retained, "No expired artifacts");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Artifact sweep failed");
            }
        }
    }
}
