use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use common::FsError;

use crate::http_server::api::{require_path, Envelope};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChownRequest {
    pub path: String,
    pub uid: u32,
    pub gid: u32,
}

pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<ChownRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ChownError> {
    let Json(request) = payload.map_err(|_| FsError::InvalidArgument)?;
    let path = require_path(Some(&request.path))?;

    state
        .namespace()
        .chown(path, request.uid, request.gid)
        .await?;

    Ok((http::StatusCode::OK, Json(Envelope::empty())).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ChownError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for ChownError {
    fn into_response(self) -> Response {
        match self {
            ChownError::Fs(err) => super::error_response(&err),
        }
    }
}
