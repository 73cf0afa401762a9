use axum::routing::{get, post};
use axum::Router;

pub mod read;
pub mod write;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/read", get(read::handler))
        .route("/write", post(write::handler))
        .with_state(state)
}
