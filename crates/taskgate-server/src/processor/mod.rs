//! Task processing: admit, simulate, record.

pub mod workload;

use std::sync::Arc;

use tokio::time::Instant;
use tracing::Instrument;

use taskgate_core::error::{Result, TaskGateError};
use taskgate_core::protocol::{ProcessResponse, TaskRequest};

use crate::admission::AdmissionGate;
use crate::obs::{MetricsAggregator, ServerMetrics};

pub use workload::{SleepWorkload, Workload};

/// Runs decoded tasks through the gate and reports them to the aggregator.
#[derive(Clone)]
pub struct TaskProcessor {
    gate: Arc<AdmissionGate>,
    metrics: Arc<MetricsAggregator>,
    telemetry: Arc<ServerMetrics>,
    workload: Arc<dyn Workload>,
}

impl TaskProcessor {
    pub fn new(
        gate: Arc<AdmissionGate>,
        metrics: Arc<MetricsAggregator>,
        telemetry: Arc<ServerMetrics>,
        workload: Arc<dyn Workload>,
    ) -> Self {
        Self {
            gate,
            metrics,
            telemetry,
            workload,
        }
    }

    /// Process one task to completion.
    ///
    /// The work runs on its own tokio task, so a caller that stops polling
    /// (client disconnect) does not cancel an admitted task.
    pub async fn process(&self, task: TaskRequest) -> Result<ProcessResponse> {
        let this = self.clone();
        tokio::spawn(async move { this.run(task).await })
            .await
            .map_err(|e| TaskGateError::Internal(format!("task worker failed: {e}")))?
    }

    async fn run(&self, task: TaskRequest) -> Result<ProcessResponse> {
        let span = tracing::info_span!("task", task_id = %task.task_id, duration_ms = task.duration);
        async move {
            let queued_at = Instant::now();
            let permit = self.gate.acquire().await?;
            let waited = queued_at.elapsed();
            self.telemetry.gate_wait.observe(waited);
            tracing::debug!(wait_ms = waited.as_millis() as u64, "gate slot acquired");

            let active = self.metrics.enter();
            let started = Instant::now();
            self.workload.run(&task).await;
            let elapsed = started.elapsed();

            self.metrics.record_completion(elapsed.as_millis() as u64);
            self.telemetry.processing_duration.observe(elapsed);
            drop(active);
            permit.release();

            tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "task completed");
            Ok::<_, TaskGateError>(ProcessResponse::for_task(&task.task_id))
        }
        .instrument(span)
        .await
    }
}
