use crate::dispatch_context::DispatchContext;
use crate::{ShutdownSignal, TaskAttemptFailed, TaskInvoker, WorkerAddress, DO_TASK_METHOD};
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-worker unit that keeps claiming tasks from the pool until shutdown
pub(crate) struct DispatchLoop<I> {
    worker: WorkerAddress,
    context: Arc<DispatchContext<I>>,
    shutdown: ShutdownSignal,
}

impl<I: TaskInvoker> DispatchLoop<I> {
    pub(crate) fn new(
        worker: WorkerAddress,
        context: Arc<DispatchContext<I>>,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            worker,
            context,
            shutdown,
        }
    }

    pub(crate) async fn run(self) {
        let phase = self.context.descriptor.phase();
        debug!(worker = %self.worker, %phase, "dispatch loop started");

        loop {
            // Shutdown is polled first so nothing is claimed once it has fired.
            let task = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                task = self.context.pool.dequeue() => task,
            };
            let Some(task) = task else {
                warn!(worker = %self.worker, %phase, "task pool closed");
                break;
            };

            // An in-flight call is never abandoned: its outcome is recorded
            // even if shutdown fires meanwhile.
            match self.attempt(task).await {
                Ok(()) => {
                    if self.context.tracker.mark_done(task) {
                        debug!(
                            "schedule: worker {} {} task #{} - succeeded",
                            self.worker, phase, task
                        );
                    } else {
                        warn!(
                            "schedule: worker {} {} task #{} - already done",
                            self.worker, phase, task
                        );
                    }
                }
                Err(failure) => {
                    debug!("schedule: {}", failure);
                    self.context.pool.enqueue(task).await;
                }
            }
        }

        debug!(worker = %self.worker, %phase, "dispatch loop stopped");
    }

    async fn attempt(&self, task: usize) -> Result<(), TaskAttemptFailed> {
        let assignment = self.context.descriptor.assignment(task);
        self.context.record_attempt();

        if self
            .context
            .invoker
            .invoke(&self.worker, DO_TASK_METHOD, &assignment)
            .await
        {
            Ok(())
        } else {
            self.context.record_failure();
            Err(TaskAttemptFailed {
                worker: self.worker.clone(),
                phase: assignment.phase,
                task,
            })
        }
    }
}
