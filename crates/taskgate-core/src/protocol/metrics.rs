use serde::{Deserialize, Serialize};

/// Body of `GET /metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricsReport {
    pub total_requests: u64,
    /// Truncated integer mean of elapsed processing time.
    pub average_processing_ms: u64,
    pub current_active_requests: i64,
}
