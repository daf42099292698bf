//! Audio Handlers

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::application::GetArtifactQuery;
use crate::domain::ArtifactId;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 从路径段解析制品标识
///
/// 文件名必须是 `{32位十六进制}.wav`，不合法直接拒绝，不触碰文件系统
fn parse_artifact_file(file: &str) -> Result<ArtifactId, ApiError> {
    file.strip_suffix(".wav")
        .and_then(|stem| ArtifactId::parse(stem).ok())
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid audio file name: {}", file)))
}

/// 下载合成音频
pub async fn download_audio(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_artifact_file(&file)?;

    let artifact = state
        .get_artifact_handler
        .handle(GetArtifactQuery { id: id.clone() })
        .await?;

    // resolve 和 open 之间文件可能刚被清理掉
    let file = match tokio::fs::File::open(&artifact.path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound(format!("Artifact not found: {}", id)));
        }
        Err(e) => {
            return Err(ApiError::Internal(format!("Failed to open audio file: {}", e)));
        }
    };

    // 流式返回文件内容
    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.content_type)
        .header(header::CONTENT_LENGTH, artifact.size_bytes)
        .body(body)
        .unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use axum::http::Request;
    use axum::Router;
    use tower::util::ServiceExt;

    use crate::application::ports::{
        AccessCredential, ArtifactStorePort, AuthError, ChatModelPort, ChatQuery,
        CompletionError, SpeechSynthesizerPort, SynthesisError, SynthesisRequest, TokenGrant,
        TokenProviderPort, TokenService,
    };
    use crate::application::{ChatTurnConfig, TokenCache};
    use crate::infrastructure::adapters::storage::FileArtifactStore;
    use crate::infrastructure::http::routes::create_routes;

    struct UnusedProvider;

    #[async_trait]
    impl TokenProviderPort for UnusedProvider {
        async fn exchange(&self, _service: TokenService) -> Result<TokenGrant, AuthError> {
            Ok(TokenGrant {
                access_token: "tok".to_string(),
                expires_in: 3600,
            })
        }
    }

    struct UnusedChatModel;

    #[async_trait]
    impl ChatModelPort for UnusedChatModel {
        async fn complete(
            &self,
            _query: &ChatQuery,
            _credential: &AccessCredential,
        ) -> Result<String, CompletionError> {
            Ok(String::new())
        }
    }

    struct UnusedSynthesizer;

    #[async_trait]
    impl SpeechSynthesizerPort for UnusedSynthesizer {
        async fn synthesize(
            &self,
            _request: &SynthesisRequest,
            _credential: &AccessCredential,
        ) -> Result<Vec<u8>, SynthesisError> {
            Ok(Vec::new())
        }
    }

    fn app(store: Arc<FileArtifactStore>) -> Router {
        let state = AppState::new(
            ChatTurnConfig::default(),
            Arc::new(TokenCache::new(Arc::new(UnusedProvider))),
            Arc::new(UnusedChatModel),
            Arc::new(UnusedSynthesizer),
            store,
        );
        create_routes().with_state(Arc::new(state))
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap()
    }

    #[test]
    fn test_parse_artifact_file() {
        let valid = format!("{}.wav", "a".repeat(32));
        assert!(parse_artifact_file(&valid).is_ok());

        assert!(parse_artifact_file("not-a-valid-id").is_err());
        assert!(parse_artifact_file("not-a-valid-id.wav").is_err());
        assert!(parse_artifact_file(&"a".repeat(32)).is_err());
        assert!(parse_artifact_file("../../../etc/passwd").is_err());
        assert!(parse_artifact_file(&format!("{}.wav", "A".repeat(32))).is_err());
        assert!(parse_artifact_file(".wav").is_err());
    }

    #[tokio::test]
    async fn test_download_invalid_id_is_400() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileArtifactStore::new(temp_dir.path()).await.unwrap());

        let response = get(app(store), "/audio/not-a-valid-id").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_download_unknown_artifact_is_404() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileArtifactStore::new(temp_dir.path()).await.unwrap());

        let uri = format!("/audio/{}.wav", "0123456789abcdef".repeat(2));
        let response = get(app(store), &uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_download_streams_stored_artifact() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileArtifactStore::new(temp_dir.path()).await.unwrap());
        let artifact = store.save(b"RIFF....WAVEfmt ".to_vec()).await.unwrap();

        let uri = format!("/audio/{}", artifact.id.file_name());
        let response = get(app(store), &uri).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "audio/wav"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_LENGTH).unwrap(),
            "16"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"RIFF....WAVEfmt ");
    }
}
