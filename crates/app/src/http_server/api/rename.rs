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
pub struct RenameRequest {
    #[serde(rename = "oldPath")]
    pub old_path: String,
    #[serde(rename = "newPath")]
    pub new_path: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<RenameRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RenameError> {
    let Json(request) = payload.map_err(|_| FsError::InvalidArgument)?;
    let old_path = require_path(Some(&request.old_path))?;
    let new_path = require_path(Some(&request.new_path))?;

    state.namespace().rename(old_path, new_path).await?;

    Ok((http::StatusCode::OK, Json(Envelope::empty())).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for RenameError {
    fn into_response(self) -> Response {
        match self {
            RenameError::Fs(err) => super::error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for RenameRequest {
    type Response = Envelope<()>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/rename").unwrap();
        client.post(full_url).json(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rename_moves_file() {
        let state = ServiceState::new();
        state.namespace().create("/a.txt", 0o644).await.unwrap();
        state.namespace().write("/a.txt", b"data", 0).await.unwrap();

        let request = RenameRequest {
            old_path: "/a.txt".to_string(),
            new_path: "/b.txt".to_string(),
        };
        let response = handler(State(state.clone()), Ok(Json(request)))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), http::StatusCode::OK);

        assert!(state.namespace().getattr("/a.txt").await.is_err());
        assert_eq!(state.namespace().getattr("/b.txt").await.unwrap().size, 4);
    }

    #[tokio::test]
    async fn test_rename_into_own_subtree_rejected() {
        let state = ServiceState::new();
        state.namespace().mkdir("/dir", 0o755).await.unwrap();

        let request = RenameRequest {
            old_path: "/dir".to_string(),
            new_path: "/dir/sub".to_string(),
        };
        let response = handler(State(state), Ok(Json(request)))
            .await
            .into_response();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wire_field_names_are_camel_case() {
        let request = RenameRequest {
            old_path: "/a".to_string(),
            new_path: "/b".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"oldPath": "/a", "newPath": "/b"})
        );
    }
}
