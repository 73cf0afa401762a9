use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use common::FsError;

use crate::http_server::api::require_path;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadRequest {
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

/// Whole-file read as raw bytes, not the JSON envelope.
pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<ReadRequest>,
) -> Result<impl IntoResponse, ReadError> {
    let path = require_path(req.path.as_deref())?;
    let offset = req.offset.unwrap_or(0);

    let ns = state.namespace();
    let attr = ns.getattr(path).await?;
    ns.open(path).await?;

    let mut buf = vec![0u8; attr.size as usize];
    let n = ns.read(path, &mut buf, offset).await?;
    buf.truncate(n);

    Ok((
        http::StatusCode::OK,
        [(http::header::CONTENT_TYPE, "application/octet-stream")],
        buf,
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for ReadError {
    fn into_response(self) -> Response {
        match self {
            ReadError::Fs(err) => crate::http_server::api::error_response(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: &str, offset: Option<u64>) -> Query<ReadRequest> {
        Query(ReadRequest {
            path: Some(path.to_string()),
            offset,
        })
    }

    async fn body_of(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_read_whole_file() {
        let state = ServiceState::new();
        state.namespace().create("/f.txt", 0o644).await.unwrap();
        state
            .namespace()
            .write("/f.txt", b"hello world", 0)
            .await
            .unwrap();

        let response = handler(State(state), request("/f.txt", None))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(http::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/octet-stream")
        );
        assert_eq!(body_of(response).await, b"hello world");
    }

    #[tokio::test]
    async fn test_read_from_offset() {
        let state = ServiceState::new();
        state.namespace().create("/f.txt", 0o644).await.unwrap();
        state
            .namespace()
            .write("/f.txt", b"hello world", 0)
            .await
            .unwrap();

        let response = handler(State(state), request("/f.txt", Some(6)))
            .await
            .unwrap()
            .into_response();
        assert_eq!(body_of(response).await, b"world");
    }

    #[tokio::test]
    async fn test_read_empty_file() {
        let state = ServiceState::new();
        state.namespace().create("/empty", 0o644).await.unwrap();

        let response = handler(State(state), request("/empty", None))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), http::StatusCode::OK);
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_read_directory_rejected() {
        let state = ServiceState::new();

        let response = handler(State(state), request("/", None))
            .await
            .into_response();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
    }
}
