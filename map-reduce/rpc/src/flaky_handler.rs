use async_trait::async_trait;
use map_reduce_core::TaskAssignment;
use map_reduce_rpc::TaskHandler;
use std::time::Duration;
use tracing::info;

/// Local worker that pretends to run tasks and fails some of them on purpose
pub struct FlakyHandler {
    id: usize,
    failure_rate: u32,
    latency: Duration,
}

impl FlakyHandler {
    pub fn new(id: usize, failure_rate: u32, latency: Duration) -> Self {
        Self {
            id,
            failure_rate,
            latency,
        }
    }
}

#[async_trait]
impl TaskHandler for FlakyHandler {
    async fn handle(&self, assignment: TaskAssignment) -> Result<(), String> {
        tokio::time::sleep(self.latency).await;

        if fastrand::u32(0..100) < self.failure_rate {
            info!(
                "[worker {}] {} task #{} -> INJECTED FAILURE",
                self.id, assignment.phase, assignment.task_number
            );
            return Err("injected failure".to_string());
        }

        info!(
            "[worker {}] {} task #{} -> OK (file={:?}, other={})",
            self.id,
            assignment.phase,
            assignment.task_number,
            assignment.file,
            assignment.num_other_phase
        );
        Ok(())
    }
}
