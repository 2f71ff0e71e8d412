//! Prometheus text exposition for taskgate.
//!
//! Label-keyed series live in `DashMap`s. Labels are flattened into sorted key
//! vectors so output ordering per series is deterministic. Histogram buckets
//! are fixed in microseconds to avoid floating point math.

use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;

use crate::app_state::AppState;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str(r.key()), val);
        }
    }
}

// 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s, 5s, 30s
const BUCKETS_MICROS: [u64; 9] = [
    1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000, 5_000_000, 30_000_000,
];

/// Unlabelled cumulative histogram (unit: microseconds).
#[derive(Default)]
pub struct Histogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

impl Histogram {
    pub fn observe(&self, duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum.fetch_add(micros, Ordering::Relaxed);
        for (bucket, &le) in self.buckets.iter().zip(BUCKETS_MICROS.iter()) {
            if micros <= le {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for (bucket, &le) in self.buckets.iter().zip(BUCKETS_MICROS.iter()) {
            let _ = writeln!(out, "{}_bucket{{le=\"{}\"}} {}", name, le, bucket.load(Ordering::Relaxed));
        }
        let count = self.count();
        let _ = writeln!(out, "{}_bucket{{le=\"+Inf\"}} {}", name, count);
        let _ = writeln!(out, "{}_sum {}", name, self.sum.load(Ordering::Relaxed));
        let _ = writeln!(out, "{}_count {}", name, count);
    }
}

/// Series that only the Prometheus endpoint exposes.
#[derive(Default)]
pub struct ServerMetrics {
    pub http_responses: CounterVec,
    pub gate_wait: Histogram,
    pub processing_duration: Histogram,
    draining: AtomicBool,
}

impl ServerMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render all series plus point-in-time gauges supplied by the caller.
    pub fn render(&self, extra: &[(&str, &str, i64)]) -> String {
        let mut out = String::new();
        self.http_responses.render("taskgate_http_responses_total", &mut out);
        self.gate_wait.render("taskgate_gate_wait_micros", &mut out);
        self.processing_duration.render("taskgate_processing_duration_micros", &mut out);
        let _ = writeln!(
            out,
            "# TYPE taskgate_draining gauge\ntaskgate_draining {}",
            u8::from(self.is_draining())
        );
        for (name, kind, v) in extra {
            let _ = writeln!(out, "# TYPE {} {}\n{} {}", name, kind, name, v);
        }
        out
    }
}

/// Route layer: count every response by matched route and status code.
pub async fn track_responses(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let resp = next.run(req).await;
    state
        .telemetry()
        .http_responses
        .inc(&[("route", &route), ("status", resp.status().as_str())]);
    resp
}
