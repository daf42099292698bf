//! Artifact Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ArtifactStorePort;
use crate::application::queries::artifact_queries::{GetArtifactQuery, GetArtifactResponse};

/// GetArtifact Handler - 定位已落盘的音频制品
pub struct GetArtifactHandler {
    artifact_store: Arc<dyn ArtifactStorePort>,
}

impl GetArtifactHandler {
    pub fn new(artifact_store: Arc<dyn ArtifactStorePort>) -> Self {
        Self { artifact_store }
    }

    pub async fn handle(
        &self,
        query: GetArtifactQuery,
    ) -> Result<GetArtifactResponse, ApplicationError> {
        let stored = self.artifact_store.resolve(&query.id).await?;

        tracing::debug!(
            artifact_id = %query.id,
            size_bytes = stored.size_bytes,
            "Artifact resolved"
        );

        Ok(GetArtifactResponse {
            path: stored.path,
            size_bytes: stored.size_bytes,
            content_type: "audio/wav".to_string(),
        })
    }
}
