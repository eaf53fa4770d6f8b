use crate::dispatch_context::DispatchContext;
use crate::dispatch_loop::DispatchLoop;
use crate::{ShutdownSignal, TaskInvoker, WorkerFeed};
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Watches the worker feed and starts one dispatch loop per new worker
pub(crate) struct FeedConsumer<F, I> {
    feed: F,
    context: Arc<DispatchContext<I>>,
    shutdown: ShutdownSignal,
    tasks: TaskTracker,
}

impl<F: WorkerFeed, I: TaskInvoker> FeedConsumer<F, I> {
    pub(crate) fn new(
        feed: F,
        context: Arc<DispatchContext<I>>,
        shutdown: ShutdownSignal,
        tasks: TaskTracker,
    ) -> Self {
        Self {
            feed,
            context,
            shutdown,
            tasks,
        }
    }

    pub(crate) async fn run(mut self) {
        let mut known = HashSet::new();

        loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                next = self.feed.next_worker() => next,
            };

            let Some(worker) = next else {
                info!("worker feed closed, no further workers for this phase");
                self.shutdown.cancelled().await;
                break;
            };

            if !known.insert(worker.clone()) {
                warn!(%worker, "worker registered twice, keeping its existing dispatch loop");
                continue;
            }

            debug!(%worker, "starting dispatch loop");
            self.context.record_worker();
            let dispatch = DispatchLoop::new(worker, self.context.clone(), self.shutdown.clone());
            self.tasks.spawn(dispatch.run());
        }

        debug!(workers = known.len(), "worker feed consumer stopped");
    }
}
