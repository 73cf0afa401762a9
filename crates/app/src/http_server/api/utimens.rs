use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use common::{FsError, TimeSpec};

use crate::http_server::api::{require_path, Envelope};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtimensRequest {
    pub path: String,
    /// `[atime, mtime]`; omit to stamp both with the current time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub times: Option<[TimeSpec; 2]>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<UtimensRequest>, JsonRejection>,
) -> Result<impl IntoResponse, UtimensError> {
    let Json(request) = payload.map_err(|_| FsError::InvalidArgument)?;
    let path = require_path(Some(&request.path))?;

    state.namespace().utimens(path, request.times).await?;

    Ok((http::StatusCode::OK, Json(Envelope::empty())).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum UtimensError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for UtimensError {
    fn into_response(self) -> Response {
        match self {
            UtimensError::Fs(err) => super::error_response(&err),
        }
    }
}
