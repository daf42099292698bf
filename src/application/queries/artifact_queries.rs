//! Artifact Queries - 音频制品查询

use std::path::PathBuf;

use crate::domain::ArtifactId;

/// 获取音频制品查询
#[derive(Debug, Clone)]
pub struct GetArtifactQuery {
    pub id: ArtifactId,
}

/// 获取音频制品响应
///
/// 返回定位信息而不是整段字节，HTTP 层直接按路径流式下发
#[derive(Debug, Clone)]
pub struct GetArtifactResponse {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub content_type: String,
}
