//! `POST /process` body decoding vectors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod vector_loader;

use std::time::Duration;

use taskgate_core::error::{ClientCode, TaskGateError};
use taskgate_core::protocol::{ProcessResponse, TaskRequest};
use vector_loader::load;

#[test]
fn parse_task_min() {
    let task = TaskRequest::from_slice(&load("task_min.json")).unwrap();
    assert_eq!(task.task_id, "t1");
    assert_eq!(task.duration, 50);
    assert_eq!(task.delay(), Duration::from_millis(50));
}

#[test]
fn unknown_fields_are_ignored() {
    let task = TaskRequest::from_slice(&load("task_extra_fields.json")).unwrap();
    assert_eq!(task, TaskRequest::new("batch-7", 250));
}

#[test]
fn missing_id_and_negative_duration() {
    let task = TaskRequest::from_slice(&load("task_negative_no_id.json")).unwrap();
    assert_eq!(task.task_id, "");
    assert_eq!(task.duration, -20);
    assert_eq!(task.delay(), Duration::ZERO);
}

#[test]
fn empty_object_defaults_everything() {
    let task = TaskRequest::from_slice(b"{}").unwrap();
    assert_eq!(task, TaskRequest::default());
}

#[test]
fn wrong_type_is_invalid_json() {
    let err = TaskRequest::from_slice(&load("bad_duration_type.json")).unwrap_err();
    assert!(matches!(err, TaskGateError::InvalidJson(_)));
    assert_eq!(err.to_string(), "Invalid JSON");
    assert_eq!(err.client_code(), ClientCode::BadRequest);
}

#[test]
fn truncated_body_is_invalid_json() {
    let err = TaskRequest::from_slice(&load("bad_truncated.json")).unwrap_err();
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn empty_body_is_invalid_json() {
    let err = TaskRequest::from_slice(b"").unwrap_err();
    assert!(matches!(err, TaskGateError::InvalidJson(_)));
}

#[test]
fn confirmation_message() {
    let resp = ProcessResponse::for_task("t1");
    assert_eq!(
        serde_json::to_string(&resp).unwrap(),
        r#"{"message":"Task t1 is being processed."}"#
    );
}

#[test]
fn null_fields_fall_back_to_defaults() {
    let task = TaskRequest::from_slice(&load("task_null_fields.json")).unwrap();
    assert_eq!(task, TaskRequest::default());

    let task = TaskRequest::from_slice(br#"{"task_id":"t1","duration":null}"#).unwrap();
    assert_eq!(task, TaskRequest::new("t1", 0));
    let task = TaskRequest::from_slice(br#"{"task_id":null,"duration":5}"#).unwrap();
    assert_eq!(task, TaskRequest::new("", 5));
}

#[test]
fn null_body_is_default_task() {
    let task = TaskRequest::from_slice(b"null").unwrap();
    assert_eq!(task, TaskRequest::default());
}

#[test]
fn only_first_value_is_read() {
    let task = TaskRequest::from_slice(&load("task_trailing.json")).unwrap();
    assert_eq!(task, TaskRequest::new("a", 1));
}
