#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use taskgate_server::obs::{ActiveDelta, MetricsAggregator};

#[test]
fn empty_average_is_zero() {
    let m = MetricsAggregator::new();
    let snap = m.snapshot();
    assert_eq!(snap.total_requests, 0);
    assert_eq!(snap.cumulative_processing_ms, 0);
    assert_eq!(snap.active_requests, 0);
    assert_eq!(m.average(), 0);
}

#[test]
fn average_truncates() {
    let m = MetricsAggregator::new();
    m.record_completion(10);
    m.record_completion(11);
    m.record_completion(11);
    assert_eq!(m.snapshot().cumulative_processing_ms, 32);
    assert_eq!(m.average(), 10);

    let report = m.snapshot().report();
    assert_eq!(report.total_requests, 3);
    assert_eq!(report.average_processing_ms, 10);
    assert_eq!(report.current_active_requests, 0);
}

#[test]
fn active_guard_pairs_enter_and_exit() {
    let m = MetricsAggregator::new();
    {
        let _a = m.enter();
        let _b = m.enter();
        assert_eq!(m.snapshot().active_requests, 2);
    }
    assert_eq!(m.snapshot().active_requests, 0);

    m.mark_active(ActiveDelta::Enter);
    assert_eq!(m.snapshot().active_requests, 1);
    m.mark_active(ActiveDelta::Exit);
    assert_eq!(m.snapshot().active_requests, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_lose_nothing() {
    let m = Arc::new(MetricsAggregator::new());
    let mut handles = Vec::new();
    for worker in 0..8u64 {
        let m = Arc::clone(&m);
        handles.push(tokio::spawn(async move {
            for i in 0..1_000u64 {
                let _active = m.enter();
                m.record_completion(worker + i % 3);
                assert!(m.snapshot().active_requests >= 1);
            }
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    let expected_sum: u64 = (0..8u64)
        .map(|w| (0..1_000u64).map(|i| w + i % 3).sum::<u64>())
        .sum();
    let snap = m.snapshot();
    assert_eq!(snap.total_requests, 8_000);
    assert_eq!(snap.cumulative_processing_ms, expected_sum);
    assert_eq!(snap.active_requests, 0);
    assert_eq!(snap.average_processing_ms(), expected_sum / 8_000);
}
