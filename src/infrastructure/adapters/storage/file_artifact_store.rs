//! File Artifact Store - 文件系统音频制品存储
//!
//! 实现 ArtifactStorePort trait，音频按 `{id}.wav` 平铺存放在单个目录

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{ArtifactStorePort, StoreError, StoredArtifact, SweepOutcome};
use crate::domain::{ArtifactId, AudioArtifact};

/// 文件系统制品存储
pub struct FileArtifactStore {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileArtifactStore {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn artifact_path(&self, id: &ArtifactId) -> PathBuf {
        self.base_dir.join(id.file_name())
    }

    /// 删除修改时间早于 cutoff 的制品
    ///
    /// 只处理 `.wav` 制品和写入中断遗留的 `.tmp` 文件，其余文件不动
    pub async fn sweep_before(&self, cutoff: DateTime<Utc>) -> Result<SweepOutcome, StoreError> {
        let mut outcome = SweepOutcome::default();

        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?
        {
            let path = entry.path();
            let is_artifact = path.extension().map_or(false, |ext| ext == "wav");
            let is_stale_tmp = path.extension().map_or(false, |ext| ext == "tmp");
            if !is_artifact && !is_stale_tmp {
                continue;
            }

            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                _ => continue,
            };
            let modified: DateTime<Utc> = match metadata.modified() {
                Ok(time) => time.into(),
                Err(_) => continue,
            };

            if modified >= cutoff {
                if is_artifact {
                    outcome.retained += 1;
                }
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => {
                    if is_artifact {
                        outcome.removed += 1;
                    }
                    tracing::debug!(path = %path.display(), "Expired artifact removed");
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to remove expired artifact"
                    );
                }
            }
        }

        Ok(outcome)
    }
}

#[async_trait]
impl ArtifactStorePort for FileArtifactStore {
    async fn save(&self, audio: Vec<u8>) -> Result<AudioArtifact, StoreError> {
        let id = ArtifactId::generate();
        let final_path = self.artifact_path(&id);
        // 先写临时文件再改名，下载侧和清理侧不会看到半写状态
        let tmp_path = self.base_dir.join(format!("{}.tmp", id.as_str()));

        fs::write(&tmp_path, &audio)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        if let Err(e) = fs::rename(&tmp_path, &final_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StoreError::IoError(e.to_string()));
        }

        tracing::debug!(
            artifact_id = %id,
            size_bytes = audio.len(),
            "Audio artifact saved"
        );

        Ok(AudioArtifact {
            id,
            path: final_path,
            created_at: Utc::now(),
        })
    }

    async fn resolve(&self, id: &ArtifactId) -> Result<StoredArtifact, StoreError> {
        let path = self.artifact_path(id);

        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.as_str().to_string()));
            }
            Err(e) => return Err(StoreError::IoError(e.to_string())),
        };

        if !metadata.is_file() {
            return Err(StoreError::NotFound(id.as_str().to_string()));
        }

        Ok(StoredArtifact {
            path,
            size_bytes: metadata.len(),
        })
    }

    async fn sweep(&self, retention: Duration) -> Result<SweepOutcome, StoreError> {
        self.sweep_before(Utc::now() - retention).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// 把文件修改时间拨回指定秒数
    fn age_file(path: &Path, seconds: u64) {
        let mtime = std::time::SystemTime::now() - std::time::Duration::from_secs(seconds);
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(mtime).unwrap();
    }

    #[tokio::test]
    async fn test_save_then_resolve() {
        let temp_dir = tempdir().unwrap();
        let store = FileArtifactStore::new(temp_dir.path()).await.unwrap();

        let artifact = store.save(b"fake wav data".to_vec()).await.unwrap();
        assert!(artifact.path.exists());
        assert!(artifact.path.to_string_lossy().ends_with(".wav"));

        let stored = store.resolve(&artifact.id).await.unwrap();
        assert_eq!(stored.path, artifact.path);
        assert_eq!(stored.size_bytes, 13);

        let content = fs::read(&stored.path).await.unwrap();
        assert_eq!(content, b"fake wav data");
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_files() {
        let temp_dir = tempdir().unwrap();
        let store = FileArtifactStore::new(temp_dir.path()).await.unwrap();

        store.save(b"data".to_vec()).await.unwrap();

        let mut names = Vec::new();
        let mut entries = fs::read_dir(temp_dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".wav"));
    }

    #[tokio::test]
    async fn test_resolve_unknown_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let store = FileArtifactStore::new(temp_dir.path()).await.unwrap();

        let err = store.resolve(&ArtifactId::generate()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_sweep_respects_retention_boundary() {
        let temp_dir = tempdir().unwrap();
        let store = FileArtifactStore::new(temp_dir.path()).await.unwrap();

        let expired = store.save(b"old".to_vec()).await.unwrap();
        let fresh = store.save(b"new".to_vec()).await.unwrap();
        age_file(&expired.path, 3601);
        age_file(&fresh.path, 3599);

        let outcome = store.sweep(Duration::seconds(3600)).await.unwrap();

        assert_eq!(outcome.removed, 1);
        assert_eq!(outcome.retained, 1);
        assert!(!expired.path.exists());
        assert!(fresh.path.exists());
    }

    #[tokio::test]
    async fn test_sweep_ignores_foreign_files() {
        let temp_dir = tempdir().unwrap();
        let store = FileArtifactStore::new(temp_dir.path()).await.unwrap();

        let notes = temp_dir.path().join("notes.txt");
        fs::write(&notes, b"keep me").await.unwrap();
        age_file(&notes, 90000);

        let outcome = store.sweep(Duration::seconds(3600)).await.unwrap();

        assert_eq!(outcome.removed, 0);
        assert!(notes.exists());
    }

    #[tokio::test]
    async fn test_sweep_removes_stale_tmp_files() {
        let temp_dir = tempdir().unwrap();
        let store = FileArtifactStore::new(temp_dir.path()).await.unwrap();

        // 模拟写入中断遗留的临时文件
        let stale = temp_dir.path().join("deadbeef.tmp");
        fs::write(&stale, b"partial").await.unwrap();
        age_file(&stale, 7200);

        let outcome = store.sweep(Duration::seconds(3600)).await.unwrap();

        // 临时文件不计入制品统计，但会被清掉
        assert_eq!(outcome.removed, 0);
        assert!(!stale.exists());
    }

    #[tokio::test]
    async fn test_sweep_empty_dir() {
        let temp_dir = tempdir().unwrap();
        let store = FileArtifactStore::new(temp_dir.path()).await.unwrap();

        let outcome = store.sweep(Duration::seconds(3600)).await.unwrap();
        assert_eq!(outcome.removed, 0);
        assert_eq!(outcome.retained, 0);
    }
}
