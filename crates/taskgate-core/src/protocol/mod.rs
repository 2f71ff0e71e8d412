//! Wire contracts for the HTTP surface.
//!
//! - `task`: `POST /process` request and confirmation
//! - `metrics`: `GET /metrics` report

pub mod metrics;
pub mod task;

pub use metrics::MetricsReport;
pub use task::{ProcessResponse, TaskRequest};
