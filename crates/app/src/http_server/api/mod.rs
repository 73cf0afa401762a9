use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use common::FsError;

pub mod chmod;
pub mod chown;
pub mod client;
pub mod create;
pub mod files;
pub mod getattr;
pub mod link;
pub mod mkdir;
pub mod opendir;
pub mod readdir;
pub mod rename;
pub mod rmdir;
pub mod statfs;
pub mod truncate;
pub mod unlink;
pub mod utimens;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/getattr", get(getattr::handler))
        .route("/chmod", post(chmod::handler))
        .route("/chown", post(chown::handler))
        .route("/utimens", post(utimens::handler))
        .route("/mkdir", post(mkdir::handler))
        .route("/rmdir", delete(rmdir::handler))
        .route("/opendir", post(opendir::handler))
        .route("/readdir", get(readdir::handler))
        .route("/readdir/paginated", get(readdir::paginated::handler))
        .route("/create", post(create::handler))
        .route("/unlink", delete(unlink::handler))
        .route("/truncate", post(truncate::handler))
        .route("/rename", post(rename::handler))
        .nest("/files", files::router(state.clone()))
        .route("/statfs", get(statfs::handler))
        .route("/link", post(link::handler))
        .with_state(state)
}

/// Wire envelope shared by every JSON endpoint.
///
/// `error` carries zero on success or the negative errno; `data` holds the
/// payload and is omitted entirely when there is none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub error: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Envelope {
            error: 0,
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn empty() -> Self {
        Envelope {
            error: 0,
            data: None,
        }
    }
}

/// Fixed errno to HTTP status mapping.
fn status_for(errno: i32) -> StatusCode {
    match errno {
        -2 => StatusCode::NOT_FOUND,
        -13 => StatusCode::FORBIDDEN,
        -17 => StatusCode::CONFLICT,
        -20 | -21 | -22 => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Envelope-shaped failure response for an engine error.
pub(crate) fn error_response(err: &FsError) -> Response {
    let errno = err.errno();
    (
        status_for(errno),
        Json(Envelope::<()> { error: errno, data: None }),
    )
        .into_response()
}

/// Paths arrive as plain strings; only absolute ones reach the engine.
pub(crate) fn require_path(path: Option<&str>) -> Result<&str, FsError> {
    match path {
        Some(p) if p.starts_with('/') => Ok(p),
        _ => Err(FsError::InvalidArgument),
    }
}
