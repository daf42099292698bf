//! 音频制品 - Value Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// 音频制品标识
///
/// 固定 32 位小写十六进制（uuid v4 的 simple 形式）。
///
/// 不变量:
/// - 不可猜测（随机生成）
/// - 文件名安全：解析拒绝一切 `^[a-f0-9]{32}$` 之外的输入，
///   下载端点在触碰文件系统之前只做这一层校验（路径穿越防护）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// 标识长度（字符数）
    pub const LEN: usize = 32;

    /// 生成新的随机标识
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// 解析不可信输入
    pub fn parse(raw: &str) -> Result<Self, &'static str> {
        if raw.len() != Self::LEN {
            return Err("制品标识必须是32位字符");
        }
        if !raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err("制品标识只允许小写十六进制字符");
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 磁盘上的文件名
    pub fn file_name(&self) -> String {
        format!("{}.wav", self.0)
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 已落盘的音频制品
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub id: ArtifactId,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
}
