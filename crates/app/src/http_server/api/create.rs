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
pub struct CreateRequest {
    pub path: String,
    /// Open flags, carried for drivers; creation itself ignores them.
    #[serde(default)]
    pub flags: u32,
    pub mode: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponse {
    pub handle: u64,
}

pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CreateError> {
    let Json(request) = payload.map_err(|_| FsError::InvalidArgument)?;
    let path = require_path(Some(&request.path))?;

    state.namespace().create(path, request.mode).await?;
    let handle = state.allocate_handle(path);

    Ok((
        http::StatusCode::OK,
        Json(Envelope::ok(CreateResponse { handle })),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for CreateError {
    fn into_response(self) -> Response {
        match self {
            CreateError::Fs(err) => super::error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for CreateRequest {
    type Response = Envelope<CreateResponse>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/create").unwrap();
        client.post(full_url).json(&self)
    }
}
