use crate::ShutdownSignal;
use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tokio_util::task::TaskTracker;

/// Owns every concurrent unit of one phase invocation and stops them together.
///
/// Dropping the coordinator without calling `shutdown` still broadcasts the
/// signal, so an abandoned phase leaves no loop calling workers.
pub struct ShutdownCoordinator {
    token: CancellationToken,
    tasks: TaskTracker,
    _cancel_on_drop: DropGuard,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let token = CancellationToken::new();
        Self {
            _cancel_on_drop: token.clone().drop_guard(),
            token,
            tasks: TaskTracker::new(),
        }
    }

    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal::new(self.token.clone())
    }

    /// Handle for spawning further tracked tasks from inside tracked tasks
    pub fn tracker(&self) -> TaskTracker {
        self.tasks.clone()
    }

    pub fn spawn<F>(&self, task: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.tasks.spawn(task)
    }

    /// Number of tracked tasks that have not exited yet
    pub fn live_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Broadcasts shutdown and waits until every tracked task has exited.
    /// Consumes the coordinator, so the signal fires exactly once.
    pub async fn shutdown(self) {
        self.token.cancel();
        self.tasks.close();
        self.tasks.wait().await;
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
