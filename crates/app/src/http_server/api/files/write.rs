use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::FsError;

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::{require_path, Envelope};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteQuery {
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse {
    #[serde(rename = "bytesWritten")]
    pub bytes_written: u64,
}

/// Raw-body write. A path that does not open is created first, so a
/// plain POST doubles as file creation.
pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<WriteQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, WriteError> {
    let path = require_path(req.path.as_deref())?;
    let offset = req.offset.unwrap_or(0);

    let ns = state.namespace();
    if ns.open(path).await.is_err() {
        ns.create(path, 0o644).await?;
    }
    let written = ns.write(path, &body, offset).await?;

    Ok((
        http::StatusCode::OK,
        Json(Envelope::ok(WriteResponse {
            bytes_written: written as u64,
        })),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for WriteError {
    fn into_response(self) -> Response {
        match self {
            WriteError::Fs(err) => crate::http_server::api::error_response(&err),
        }
    }
}

/// Client-side request: query parameters plus the raw body.
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub path: String,
    pub offset: u64,
    pub data: Vec<u8>,
}

// Client implementation - builds request for this operation
impl ApiRequest for WriteRequest {
    type Response = Envelope<WriteResponse>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/files/write").unwrap();
        client
            .post(full_url)
            .query(&[("path", self.path.as_str())])
            .query(&[("offset", self.offset)])
            .header(http::header::CONTENT_TYPE, "application/octet-stream")
            .body(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: &str, offset: Option<u64>) -> Query<WriteQuery> {
        Query(WriteQuery {
            path: Some(path.to_string()),
            offset,
        })
    }

    async fn bytes_written(response: Response) -> u64 {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let env: Envelope<WriteResponse> = serde_json::from_slice(&body).unwrap();
        env.data.unwrap().bytes_written
    }

    #[tokio::test]
    async fn test_write_creates_missing_file() {
        let state = ServiceState::new();

        let response = handler(
            State(state.clone()),
            request("/new.txt", None),
            Bytes::from_static(b"payload"),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(bytes_written(response).await, 7);

        let attr = state.namespace().getattr("/new.txt").await.unwrap();
        assert_eq!(attr.size, 7);
        assert_eq!(attr.perm(), 0o644);
    }

    #[tokio::test]
    async fn test_write_at_offset_zero_fills_gap() {
        let state = ServiceState::new();

        handler(
            State(state.clone()),
            request("/sparse.bin", Some(4)),
            Bytes::from_static(b"tail"),
        )
        .await
        .unwrap();

        let mut buf = [0u8; 8];
        let n = state
            .namespace()
            .read("/sparse.bin", &mut buf, 0)
            .await
            .unwrap();
        assert_eq!(n, 8);
        assert_eq!(&buf, b"\0\0\0\0tail");
    }

    #[tokio::test]
    async fn test_write_to_directory_conflicts() {
        let state = ServiceState::new();
        state.namespace().mkdir("/docs", 0o755).await.unwrap();

        // Open fails on the directory and so does the fallback create
        let response = handler(
            State(state),
            request("/docs", None),
            Bytes::from_static(b"x"),
        )
        .await
        .into_response();
        assert_eq!(response.status(), http::StatusCode::CONFLICT);
    }
}
