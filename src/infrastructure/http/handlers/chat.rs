//! Chat Handlers

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::application::ChatTurnCommand;
use crate::infrastructure::http::dto::{ChatTextRequest, ChatTextResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 一次问答：生成文本回答并尽力附带合成音频链接
pub async fn chat_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatTextRequest>,
) -> Result<Json<ChatTextResponse>, ApiError> {
    let cmd = ChatTurnCommand {
        query: req.query,
        voice: req.voice.unwrap_or_default(),
    };

    let result = state.chat_turn_handler.handle(cmd).await?;

    let audio_url = result
        .artifact
        .as_ref()
        .map(|artifact| format!("/audio/{}", artifact.id.file_name()));

    Ok(Json(ChatTextResponse {
        text_response: result.answer,
        audio_url,
        timestamp: Utc::now().to_rfc3339(),
        voice_used: result.voice_used.as_str().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use chrono::Utc;
    use std::path::PathBuf;
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

    struct OkProvider;

    #[async_trait]
    impl TokenProviderPort for OkProvider {
        async fn exchange(&self, _service: TokenService) -> Result<TokenGrant, AuthError> {
            Ok(TokenGrant {
                access_token: "tok".to_string(),
                expires_in: 3600,
            })
        }
    }

    struct FixedChatModel(String);

    #[async_trait]
    impl ChatModelPort for FixedChatModel {
        async fn complete(
            &self,
            _query: &ChatQuery,
            _credential: &AccessCredential,
        ) -> Result<String, CompletionError> {
            Ok(self.0.clone())
        }
    }

    struct StubSynthesizer {
        fail: bool,
    }

    #[async_trait]
    impl SpeechSynthesizerPort for StubSynthesizer {
        async fn synthesize(
            &self,
            _request: &SynthesisRequest,
            _credential: &AccessCredential,
        ) -> Result<Vec<u8>, SynthesisError> {
            if self.fail {
                Err(SynthesisError::Status {
                    status: 500,
                    body: "backend down".to_string(),
                })
            } else {
                Ok(b"RIFF....".to_vec())
            }
        }
    }

    struct StubStore;

    #[async_trait]
    impl ArtifactStorePort for StubStore {
        async fn save(&self, _audio: Vec<u8>) -> Result<AudioArtifact, StoreError> {
            let id = ArtifactId::generate();
            let path = PathBuf::from(format!("/tmp/{}", id.file_name()));
            Ok(AudioArtifact {
                id,
                path,
                created_at: Utc::now(),
            })
        }

        async fn resolve(&self, id: &ArtifactId) -> Result<StoredArtifact, StoreError> {
            Err(StoreError::NotFound(id.as_str().to_string()))
        }

        async fn sweep(&self, _retention: chrono::Duration) -> Result<SweepOutcome, StoreError> {
            Ok(SweepOutcome::default())
        }
    }

    fn app(synthesis_ok: bool) -> Router {
        let state = AppState::new(
            ChatTurnConfig::default(),
            Arc::new(TokenCache::new(Arc::new(OkProvider))),
            Arc::new(FixedChatModel("Бауманская".to_string())),
            Arc::new(StubSynthesizer {
                fail: !synthesis_ok,
            }),
            Arc::new(StubStore),
        );
        create_routes().with_state(Arc::new(state))
    }

    async fn post_json(
        app: Router,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat/text")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_chat_text_returns_answer_and_audio_url() {
        let (status, body) = post_json(
            app(true),
            serde_json::json!({"query": "Где метро?", "voice": "female"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["textResponse"], "Бауманская");
        assert_eq!(body["voiceUsed"], "female");
        assert!(body["timestamp"].as_str().is_some());

        let url = body["audioUrl"].as_str().unwrap();
        assert!(url.starts_with("/audio/"));
        assert!(url.ends_with(".wav"));
    }

    #[tokio::test]
    async fn test_chat_text_empty_query_is_400() {
        let (status, body) = post_json(app(true), serde_json::json!({"query": "   "})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn test_chat_text_missing_query_is_400() {
        // 载荷缺失 query 字段时按空串处理，与空 query 走同一条 400 路径
        let (status, body) = post_json(app(true), serde_json::json!({"voice": "male"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn test_chat_text_synthesis_failure_yields_null_audio() {
        let (status, body) = post_json(app(false), serde_json::json!({"query": "вопрос"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["textResponse"], "Бауманская");
        assert!(body["audioUrl"].is_null());
    }

    #[tokio::test]
    async fn test_chat_text_voice_defaults_to_male() {
        let (status, body) = post_json(app(true), serde_json::json!({"query": "вопрос"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["voiceUsed"], "male");
    }
}
