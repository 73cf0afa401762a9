use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::{FileAttr, FsError};

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::{require_path, Envelope};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetattrRequest {
    pub path: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<GetattrRequest>,
) -> Result<impl IntoResponse, GetattrError> {
    let path = require_path(req.path.as_deref())?;

    let attr = state.namespace().getattr(path).await?;

    Ok((http::StatusCode::OK, Json(Envelope::ok(attr))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum GetattrError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for GetattrError {
    fn into_response(self) -> Response {
        match self {
            GetattrError::Fs(err) => super::error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for GetattrRequest {
    type Response = Envelope<FileAttr>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/getattr").unwrap();
        client
            .get(full_url)
            .query(&[("path", self.path.as_deref().unwrap_or(""))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: Option<&str>) -> Query<GetattrRequest> {
        Query(GetattrRequest {
            path: path.map(String::from),
        })
    }

    #[tokio::test]
    async fn test_root_attrs() {
        let state = ServiceState::new();
        let response = handler(State(state), request(Some("/")))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_path_param_is_invalid() {
        let state = ServiceState::new();
        let response = handler(State(state), request(None))
            .await
            .into_response();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let state = ServiceState::new();
        let response = handler(State(state), request(Some("/missing")))
            .await
            .into_response();
        assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
    }
}
