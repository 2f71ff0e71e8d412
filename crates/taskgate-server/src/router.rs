//! Axum router wiring.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, obs, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/process", post(transport::http::process))
        .route("/metrics", get(transport::http::metrics))
        .route("/metrics/prometheus", get(ops::prometheus))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route_layer(middleware::from_fn_with_state(state.clone(), obs::track_responses))
        .with_state(state)
}
