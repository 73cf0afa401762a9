use axum::routing::get;
use axum::Router;

mod livez;
mod readyz;
mod version;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/livez", get(livez::handler))
        .route("/readyz", get(readyz::handler))
        .route("/version", get(version::handler))
        .with_state(state)
}
