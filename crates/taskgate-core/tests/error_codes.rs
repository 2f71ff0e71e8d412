#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use taskgate_core::error::TaskGateError;
use taskgate_core::protocol::MetricsReport;

#[test]
fn client_codes_are_stable() {
    let cases = [
        (
            TaskGateError::InvalidJson(serde_json::from_str::<u8>("x").unwrap_err()),
            "BAD_REQUEST",
        ),
        (TaskGateError::InvalidConfig("x".into()), "INVALID_CONFIG"),
        (TaskGateError::UnsupportedVersion, "UNSUPPORTED_VERSION"),
        (TaskGateError::GateClosed, "UNAVAILABLE"),
        (TaskGateError::Internal("x".into()), "INTERNAL"),
    ];
    for (err, code) in cases {
        assert_eq!(err.client_code().as_str(), code, "{err}");
    }
}

#[test]
fn metrics_report_field_names() {
    let report = MetricsReport {
        total_requests: 3,
        average_processing_ms: 41,
        current_active_requests: 1,
    };
    let v: serde_json::Value = serde_json::to_value(report).unwrap();
    assert_eq!(v["total_requests"], 3);
    assert_eq!(v["average_processing_ms"], 41);
    assert_eq!(v["current_active_requests"], 1);
}
