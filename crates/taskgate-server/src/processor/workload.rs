use async_trait::async_trait;

use taskgate_core::protocol::TaskRequest;

/// The "work" a task performs while holding a gate slot.
#[async_trait]
pub trait Workload: Send + Sync {
    async fn run(&self, task: &TaskRequest);
}

/// Cooperative timer wait for the task's requested duration.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepWorkload;

#[async_trait]
impl Workload for SleepWorkload {
    async fn run(&self, task: &TaskRequest) {
        tokio::time::sleep(task.delay()).await;
    }
}
