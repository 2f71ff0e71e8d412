//! Task request decoding.
//!
//! Missing or `null` fields fall back to zero values (`""`, `0`), a `null`
//! body is an all-default task, unknown fields are ignored, and anything after
//! the first JSON value is not read. Only syntax errors and wrong field types
//! are rejected.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TaskGateError};

/// One simulated unit of work. Lives only for the request that carried it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub task_id: String,
    /// Requested work time in milliseconds. May be negative; see [`TaskRequest::delay`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: i64,
}

impl TaskRequest {
    pub fn new(task_id: impl Into<String>, duration_ms: i64) -> Self {
        Self {
            task_id: task_id.into(),
            duration: duration_ms,
        }
    }

    /// Decode a request body. Any decode failure maps to [`TaskGateError::InvalidJson`].
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_slice(body);
        Option::<TaskRequest>::deserialize(&mut de)
            .map(Option::unwrap_or_default)
            .map_err(TaskGateError::InvalidJson)
    }

    /// Wait time for the simulation. Non-positive durations mean no wait.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.duration.max(0) as u64)
    }
}

fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Confirmation returned once a task has been processed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProcessResponse {
    pub message: String,
}

impl ProcessResponse {
    pub fn for_task(task_id: &str) -> Self {
        Self {
            message: format!("Task {task_id} is being processed."),
        }
    }
}
