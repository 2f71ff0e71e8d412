//! Task endpoints.
//!
//! - `POST /process`: decode, run through the gate, confirm
//! - `GET /metrics` : JSON snapshot of the aggregator

use axum::{extract::State, Json};
use bytes::Bytes;

use taskgate_core::protocol::{MetricsReport, ProcessResponse, TaskRequest};

use crate::app_state::AppState;
use crate::transport::HttpError;

/// The body is taken raw so decoding does not depend on the request's
/// content type and failures map to a plain `Invalid JSON` reply.
pub async fn process(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, HttpError> {
    let task = TaskRequest::from_slice(&body).map_err(|e| {
        tracing::debug!(error = ?e, len = body.len(), "rejected task body");
        e
    })?;
    let resp = state.processor().process(task).await?;
    Ok(Json(resp))
}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(state.metrics().snapshot().report())
}
