use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use common::FsError;

use crate::http_server::api::{require_path, Envelope};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpendirRequest {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpendirResponse {
    pub handle: u64,
}

pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<OpendirRequest>, JsonRejection>,
) -> Result<impl IntoResponse, OpendirError> {
    let Json(request) = payload.map_err(|_| FsError::InvalidArgument)?;
    let path = require_path(Some(&request.path))?;

    // The engine hands back no usable handle; allocate one for the caller
    state.namespace().opendir(path).await?;
    let handle = state.allocate_handle(path);

    Ok((
        http::StatusCode::OK,
        Json(Envelope::ok(OpendirResponse { handle })),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum OpendirError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for OpendirError {
    fn into_response(self) -> Response {
        match self {
            OpendirError::Fs(err) => super::error_response(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_opendir_allocates_distinct_handles() {
        let state = ServiceState::new();
        state.namespace().mkdir("/docs", 0o755).await.unwrap();

        let request = OpendirRequest {
            path: "/docs".to_string(),
        };
        let first = handler(State(state.clone()), Ok(Json(request.clone())))
            .await
            .unwrap()
            .into_response();
        assert_eq!(first.status(), http::StatusCode::OK);

        let body = axum::body::to_bytes(first.into_body(), usize::MAX)
            .await
            .unwrap();
        let env: Envelope<OpendirResponse> = serde_json::from_slice(&body).unwrap();
        let first_handle = env.data.unwrap().handle;
        assert!(first_handle >= 1);

        let second = handler(State(state.clone()), Ok(Json(request)))
            .await
            .unwrap()
            .into_response();
        let body = axum::body::to_bytes(second.into_body(), usize::MAX)
            .await
            .unwrap();
        let env: Envelope<OpendirResponse> = serde_json::from_slice(&body).unwrap();
        assert_ne!(env.data.unwrap().handle, first_handle);

        assert_eq!(state.handle_path(first_handle).as_deref(), Some("/docs"));
    }

    #[tokio::test]
    async fn test_opendir_on_file_fails() {
        let state = ServiceState::new();
        state.namespace().create("/f.txt", 0o644).await.unwrap();

        let request = OpendirRequest {
            path: "/f.txt".to_string(),
        };
        let response = handler(State(state), Ok(Json(request)))
            .await
            .into_response();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
    }
}
