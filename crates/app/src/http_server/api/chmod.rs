use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use common::FsError;

use crate::http_server::api::{require_path, Envelope};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChmodRequest {
    pub path: String,
    pub mode: u32,
}

pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<ChmodRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ChmodError> {
    let Json(request) = payload.map_err(|_| FsError::InvalidArgument)?;
    let path = require_path(Some(&request.path))?;

    state.namespace().chmod(path, request.mode).await?;

    Ok((http::StatusCode::OK, Json(Envelope::empty())).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ChmodError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for ChmodError {
    fn into_response(self) -> Response {
        match self {
            ChmodError::Fs(err) => super::error_response(&err),
        }
    }
}
