//! Observability: the task statistics aggregator and the Prometheus exporter.
//!
//! `aggregator` holds the counters behind `GET /metrics`. `prom` holds the
//! label-keyed series rendered by `GET /metrics/prometheus`, plus the response
//! tracking middleware that feeds them.

pub mod aggregator;
pub mod prom;

pub use aggregator::{ActiveDelta, ActiveGuard, MetricsAggregator, MetricsSnapshot};
pub use prom::{track_responses, ServerMetrics};
