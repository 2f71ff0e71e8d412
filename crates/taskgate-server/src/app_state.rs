//! Shared application state for the taskgate server.
//!
//! Built once at startup and handed to every handler through axum state.
//! Tests construct their own isolated instances.

use std::sync::Arc;

use crate::admission::AdmissionGate;
use crate::config::ServerConfig;
use crate::obs::{MetricsAggregator, ServerMetrics};
use crate::processor::{SleepWorkload, TaskProcessor, Workload};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    processor: TaskProcessor,
}

struct AppStateInner {
    cfg: ServerConfig,
    gate: Arc<AdmissionGate>,
    metrics: Arc<MetricsAggregator>,
    telemetry: Arc<ServerMetrics>,
}

impl AppState {
    pub fn new(cfg: ServerConfig) -> Self {
        Self::with_workload(cfg, Arc::new(SleepWorkload))
    }

    /// Build state around a custom [`Workload`].
    pub fn with_workload(cfg: ServerConfig, workload: Arc<dyn Workload>) -> Self {
        let gate = Arc::new(AdmissionGate::new(cfg.max_concurrent));
        let metrics = Arc::new(MetricsAggregator::new());
        let telemetry = Arc::new(ServerMetrics::default());
        let processor = TaskProcessor::new(
            Arc::clone(&gate),
            Arc::clone(&metrics),
            Arc::clone(&telemetry),
            workload,
        );

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                gate,
                metrics,
                telemetry,
            }),
            processor,
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.inner.gate
    }

    pub fn metrics(&self) -> &MetricsAggregator {
        &self.inner.metrics
    }

    pub fn telemetry(&self) -> &ServerMetrics {
        &self.inner.telemetry
    }

    pub fn processor(&self) -> &TaskProcessor {
        &self.processor
    }

    pub fn set_draining(&self) {
        self.inner.telemetry.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.telemetry.is_draining()
    }

    /// Point-in-time gauges appended to the Prometheus output.
    pub fn prometheus_extra(&self) -> Vec<(&'static str, &'static str, i64)> {
        let snap = self.metrics().snapshot();
        let gate = self.gate();
        vec![
            ("taskgate_tasks_completed_total", "counter", saturating_i64(snap.total_requests)),
            ("taskgate_processing_ms_total", "counter", saturating_i64(snap.cumulative_processing_ms)),
            ("taskgate_tasks_active", "gauge", snap.active_requests),
            ("taskgate_gate_capacity", "gauge", saturating_i64(gate.capacity() as u64)),
            ("taskgate_gate_in_use", "gauge", saturating_i64(gate.occupancy() as u64)),
        ]
    }
}

fn saturating_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}
