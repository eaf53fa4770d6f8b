use async_trait::async_trait;
use map_reduce_core::TaskAssignment;

/// Worker-side execution of one map or reduce task
#[async_trait]
pub trait TaskHandler: Send + Sync + 'static {
    async fn handle(&self, assignment: TaskAssignment) -> Result<(), String>;
}
