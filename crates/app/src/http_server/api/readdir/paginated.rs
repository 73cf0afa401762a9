use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::{DirEntry, FsError};

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::{require_path, Envelope};
use crate::ServiceState;

pub const DEFAULT_PAGE_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaddirPageRequest {
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaddirPageResponse {
    pub entries: Vec<DirEntry>,
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
}

#[axum::debug_handler]
pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<ReaddirPageRequest>,
) -> Result<impl IntoResponse, ReaddirPageError> {
    let path = require_path(req.path.as_deref())?;
    let offset = req.offset.unwrap_or(0);
    let limit = req.limit.unwrap_or(DEFAULT_PAGE_LIMIT);

    // Materialize the full listing, then slice the requested window
    let all = state.namespace().readdir(path).await?;
    let total = all.len();
    let entries: Vec<DirEntry> = all.into_iter().skip(offset).take(limit).collect();

    Ok((
        http::StatusCode::OK,
        Json(Envelope::ok(ReaddirPageResponse {
            entries,
            offset,
            limit,
            total,
        })),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ReaddirPageError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for ReaddirPageError {
    fn into_response(self) -> Response {
        match self {
            ReaddirPageError::Fs(err) => crate::http_server::api::error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for ReaddirPageRequest {
    type Response = Envelope<ReaddirPageResponse>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/readdir/paginated").unwrap();
        let mut builder = client
            .get(full_url)
            .query(&[("path", self.path.as_deref().unwrap_or(""))]);
        if let Some(offset) = self.offset {
            builder = builder.query(&[("offset", offset)]);
        }
        if let Some(limit) = self.limit {
            builder = builder.query(&[("limit", limit)]);
        }
        builder
    }
}
