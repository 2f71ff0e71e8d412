//! Process-wide task statistics.
//!
//! Each counter is its own atomic. A snapshot reads them one by one, so the
//! three fields are individually exact but not captured at a single instant.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use taskgate_core::protocol::MetricsReport;

/// Direction of an active-count adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveDelta {
    Enter,
    Exit,
}

impl ActiveDelta {
    fn as_i64(self) -> i64 {
        match self {
            ActiveDelta::Enter => 1,
            ActiveDelta::Exit => -1,
        }
    }
}

#[derive(Debug, Default)]
pub struct MetricsAggregator {
    total_requests: AtomicU64,
    cumulative_ms: AtomicU64,
    active_requests: AtomicI64,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished task that took `elapsed_ms`.
    pub fn record_completion(&self, elapsed_ms: u64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.cumulative_ms.fetch_add(elapsed_ms, Ordering::Relaxed);
    }

    /// Adjust the active count. Prefer [`MetricsAggregator::enter`], which pairs
    /// the exit automatically.
    pub fn mark_active(&self, delta: ActiveDelta) {
        self.active_requests.fetch_add(delta.as_i64(), Ordering::Relaxed);
    }

    /// Mark one task active until the returned guard drops.
    pub fn enter(&self) -> ActiveGuard<'_> {
        self.mark_active(ActiveDelta::Enter);
        ActiveGuard { metrics: self }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            cumulative_processing_ms: self.cumulative_ms.load(Ordering::Relaxed),
            active_requests: self.active_requests.load(Ordering::Relaxed),
        }
    }

    /// Mean processing time in whole milliseconds, 0 before the first completion.
    pub fn average(&self) -> u64 {
        self.snapshot().average_processing_ms()
    }
}

/// Decrements the active count on drop.
#[derive(Debug)]
pub struct ActiveGuard<'a> {
    metrics: &'a MetricsAggregator,
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.metrics.mark_active(ActiveDelta::Exit);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub cumulative_processing_ms: u64,
    pub active_requests: i64,
}

impl MetricsSnapshot {
    /// Truncating integer division; 0 when nothing has completed.
    pub fn average_processing_ms(&self) -> u64 {
        self.cumulative_processing_ms
            .checked_div(self.total_requests)
            .unwrap_or(0)
    }

    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total_requests: self.total_requests,
            average_processing_ms: self.average_processing_ms(),
            current_active_requests: self.active_requests,
        }
    }
}
