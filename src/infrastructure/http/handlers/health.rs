//! Health Handler
//!
//! 健康检查端点

use axum::Json;
use chrono::Utc;

use crate::infrastructure::http::dto::{HealthResponse, ServicesStatus};

/// Health endpoint - 存活探针
///
/// services 字段报告配置状态，不向上游发起探测请求
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        services: ServicesStatus {
            chat: "available",
            speech: "available",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    use crate::application::ports::{
        AccessCredential, ArtifactStorePort, AuthError, ChatModelPort, ChatQuery,
        CompletionError, SpeechSynthesizerPort, StoreError, StoredArtifact, SweepOutcome,
        SynthesisError, SynthesisRequest, TokenGrant, TokenProviderPort, TokenService,
    };
    use crate::application::{ChatTurnConfig, TokenCache};
    use crate::domain::{ArtifactId, AudioArtifact};
    use crate::infrastructure::http::routes::create_routes;
    use crate::infrastructure::http::state::AppState;

    // 健康检查不触达任何端口，桩实现只为构造 AppState
    struct Unwired;

    #[async_trait]
    impl TokenProviderPort for Unwired {
        async fn exchange(&self, _service: TokenService) -> Result<TokenGrant, AuthError> {
            Err(AuthError::NetworkError("unused".to_string()))
        }
    }

    #[async_trait]
    impl ChatModelPort for Unwired {
        async fn complete(
            &self,
            _query: &ChatQuery,
            _credential: &AccessCredential,
        ) -> Result<String, CompletionError> {
            Err(CompletionError::NetworkError("unused".to_string()))
        }
    }

    #[async_trait]
    impl SpeechSynthesizerPort for Unwired {
        async fn synthesize(
            &self,
            _request: &SynthesisRequest,
            _credential: &AccessCredential,
        ) -> Result<Vec<u8>, SynthesisError> {
            Err(SynthesisError::NetworkError("unused".to_string()))
        }
    }

    #[async_trait]
    impl ArtifactStorePort for Unwired {
        async fn save(&self, _audio: Vec<u8>) -> Result<AudioArtifact, StoreError> {
            Err(StoreError::IoError("unused".to_string()))
        }

        async fn resolve(&self, id: &ArtifactId) -> Result<StoredArtifact, StoreError> {
            Err(StoreError::NotFound(id.as_str().to_string()))
        }

        async fn sweep(&self, _retention: chrono::Duration) -> Result<SweepOutcome, StoreError> {
            Ok(SweepOutcome::default())
        }
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let Json(response) = health().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.timestamp.is_empty());
        assert!(!response.version.is_empty());
        assert_eq!(response.services.chat, "available");
        assert_eq!(response.services.speech, "available");
    }

    #[tokio::test]
    async fn test_health_route_responds_through_router() {
        let state = AppState::new(
            ChatTurnConfig::default(),
            Arc::new(TokenCache::new(Arc::new(Unwired))),
            Arc::new(Unwired),
            Arc::new(Unwired),
            Arc::new(Unwired),
        );
        let app = create_routes().with_state(Arc::new(state));

        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["services"]["chat"], "available");
        assert_eq!(body["services"]["speech"], "available");
        assert!(body["timestamp"].as_str().is_some());
        assert!(body["version"].as_str().is_some());
    }
}
