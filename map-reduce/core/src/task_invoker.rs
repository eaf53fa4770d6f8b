use crate::{TaskAssignment, WorkerAddress};
use async_trait::async_trait;
use std::sync::Arc;

/// RPC method every dispatch attempt calls on its worker
pub const DO_TASK_METHOD: &str = "Worker.DoTask";

/// Remote call operation used to run one task on one worker.
///
/// Returns `true` only when the worker reports success. Transport errors,
/// unreachable workers and timeouts all map to `false`. Any timeout is the
/// implementation's business; the scheduler waits as long as the call does.
#[async_trait]
pub trait TaskInvoker: Send + Sync + 'static {
    async fn invoke(
        &self,
        worker: &WorkerAddress,
        method: &str,
        assignment: &TaskAssignment,
    ) -> bool;
}

#[async_trait]
impl<T: TaskInvoker + ?Sized> TaskInvoker for Arc<T> {
    async fn invoke(
        &self,
        worker: &WorkerAddress,
        method: &str,
        assignment: &TaskAssignment,
    ) -> bool {
        (**self).invoke(worker, method, assignment).await
    }
}
