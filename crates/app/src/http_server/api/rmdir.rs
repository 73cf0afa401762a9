use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::FsError;

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::{require_path, Envelope};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmdirRequest {
    pub path: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<RmdirRequest>,
) -> Result<impl IntoResponse, RmdirError> {
    let path = require_path(req.path.as_deref())?;

    state.namespace().rmdir(path).await?;

    Ok((http::StatusCode::OK, Json(Envelope::empty())).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum RmdirError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for RmdirError {
    fn into_response(self) -> Response {
        match self {
            RmdirError::Fs(err) => super::error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for RmdirRequest {
    type Response = Envelope<()>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/rmdir").unwrap();
        client
            .delete(full_url)
            .query(&[("path", self.path.as_deref().unwrap_or(""))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: &str) -> Query<RmdirRequest> {
        Query(RmdirRequest {
            path: Some(path.to_string()),
        })
    }

    #[tokio::test]
    async fn test_rmdir_empty_directory() {
        let state = ServiceState::new();
        state.namespace().mkdir("/docs", 0o755).await.unwrap();

        let response = handler(State(state.clone()), request("/docs"))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), http::StatusCode::OK);
        assert!(state.namespace().getattr("/docs").await.is_err());
    }

    #[tokio::test]
    async fn test_rmdir_populated_directory_fails() {
        let state = ServiceState::new();
        state.namespace().mkdir("/docs", 0o755).await.unwrap();
        state
            .namespace()
            .create("/docs/f.txt", 0o644)
            .await
            .unwrap();

        let response = handler(State(state), request("/docs"))
            .await
            .into_response();
        assert_eq!(response.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
