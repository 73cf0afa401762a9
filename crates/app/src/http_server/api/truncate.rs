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
pub struct TruncateRequest {
    pub path: String,
    pub size: u64,
}

pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<TruncateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, TruncateError> {
    let Json(request) = payload.map_err(|_| FsError::InvalidArgument)?;
    let path = require_path(Some(&request.path))?;

    state.namespace().truncate(path, request.size).await?;

    Ok((http::StatusCode::OK, Json(Envelope::empty())).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum TruncateError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for TruncateError {
    fn into_response(self) -> Response {
        match self {
            TruncateError::Fs(err) => super::error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for TruncateRequest {
    type Response = Envelope<()>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/truncate").unwrap();
        client.post(full_url).json(&self)
    }
}
