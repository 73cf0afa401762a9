use std::path::PathBuf;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::FsError;

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::{require_path, Envelope};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRequest {
    /// Namespace path to bind.
    pub path: String,
    /// Host directory backing the subtree.
    pub target: PathBuf,
}

pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<LinkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LinkError> {
    let Json(request) = payload.map_err(|_| FsError::InvalidArgument)?;
    let path = require_path(Some(&request.path))?;

    state.namespace().link_local(path, &request.target).await?;
    tracing::info!(
        path = %request.path,
        target = %request.target.display(),
        "linked backend"
    );

    Ok((http::StatusCode::OK, Json(Envelope::empty())).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for LinkError {
    fn into_response(self) -> Response {
        match self {
            LinkError::Fs(err) => super::error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for LinkRequest {
    type Response = Envelope<()>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/link").unwrap();
        client.post(full_url).json(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_link_exposes_backend_contents() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("hello.txt"), b"hi").unwrap();

        let state = ServiceState::new();
        let request = LinkRequest {
            path: "/ext".to_string(),
            target: temp.path().to_path_buf(),
        };
        let response = handler(State(state.clone()), Ok(Json(request)))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), http::StatusCode::OK);

        let attr = state.namespace().getattr("/ext/hello.txt").await.unwrap();
        assert_eq!(attr.size, 2);
    }

    #[tokio::test]
    async fn test_link_over_existing_node_conflicts() {
        let state = ServiceState::new();
        state.namespace().mkdir("/ext", 0o755).await.unwrap();

        let request = LinkRequest {
            path: "/ext".to_string(),
            target: "/tmp".into(),
        };
        let response = handler(State(state), Ok(Json(request)))
            .await
            .into_response();
        assert_eq!(response.status(), http::StatusCode::CONFLICT);
    }
}
