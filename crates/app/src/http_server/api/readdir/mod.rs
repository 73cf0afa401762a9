use axum::body::Body;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::stream;
use serde::{Deserialize, Serialize};

use common::FsError;

use crate::http_server::api::{require_path, Envelope};
use crate::ServiceState;

pub mod paginated;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaddirRequest {
    pub path: Option<String>,
}

/// Streaming listing: one envelope per entry, each flushed as its own
/// body frame so a reader can consume entries as they arrive.
pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<ReaddirRequest>,
) -> Result<impl IntoResponse, ReaddirError> {
    let path = require_path(req.path.as_deref())?;

    let entries = state.namespace().readdir(path).await?;

    let frames = entries.into_iter().map(|entry| {
        let mut line = serde_json::to_vec(&Envelope::ok(entry)).expect("entry serializes");
        line.push(b'\n');
        Ok::<_, std::convert::Infallible>(Bytes::from(line))
    });

    Ok((
        http::StatusCode::OK,
        [(http::header::CONTENT_TYPE, "application/json")],
        Body::from_stream(stream::iter(frames)),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ReaddirError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for ReaddirError {
    fn into_response(self) -> Response {
        match self {
            ReaddirError::Fs(err) => crate::http_server::api::error_response(&err),
        }
    }
}
