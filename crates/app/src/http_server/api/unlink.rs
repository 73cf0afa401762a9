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
pub struct UnlinkRequest {
    pub path: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<UnlinkRequest>,
) -> Result<impl IntoResponse, UnlinkError> {
    let path = require_path(req.path.as_deref())?;

    state.namespace().unlink(path).await?;

    Ok((http::StatusCode::OK, Json(Envelope::empty())).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum UnlinkError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for UnlinkError {
    fn into_response(self) -> Response {
        match self {
            UnlinkError::Fs(err) => super::error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for UnlinkRequest {
    type Response = Envelope<()>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/unlink").unwrap();
        client
            .delete(full_url)
            .query(&[("path", self.path.as_deref().unwrap_or(""))])
    }
}
