use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::{FsError, StatVfs};

use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::Envelope;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatfsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<StatfsRequest>,
) -> Result<impl IntoResponse, StatfsError> {
    // The figures are path-independent; an absent path means the root
    let path = req.path.as_deref().filter(|p| !p.is_empty()).unwrap_or("/");

    let stat = state.namespace().statfs(path).await?;

    Ok((http::StatusCode::OK, Json(Envelope::ok(stat))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum StatfsError {
    #[error(transparent)]
    Fs(#[from] FsError),
}

impl IntoResponse for StatfsError {
    fn into_response(self) -> Response {
        match self {
            StatfsError::Fs(err) => super::error_response(&err),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for StatfsRequest {
    type Response = Envelope<StatVfs>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/statfs").unwrap();
        let builder = client.get(full_url);
        match self.path {
            Some(path) => builder.query(&[("path", path)]),
            None => builder,
        }
    }
}
