use crate::dispatch_context::DispatchContext;
use crate::feed_consumer::FeedConsumer;
use crate::{
    PhaseDescriptor, PhaseState, PhaseSummary, ShutdownCoordinator, TaskInvoker, WorkerFeed,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Runs phases of identical tasks on a dynamically growing set of workers.
///
/// Failed attempts are retried on any worker until every task has succeeded
/// exactly once. Nothing is reported as an error: if no worker ever succeeds
/// on some task, `schedule` keeps waiting for one that will.
pub struct Scheduler<I> {
    invoker: Arc<I>,
}

impl<I: TaskInvoker> Scheduler<I> {
    pub fn new(invoker: I) -> Self {
        Self {
            invoker: Arc::new(invoker),
        }
    }

    /// Schedules every task of `descriptor` on workers read from `feed` and
    /// returns once all of them are done and every loop it started has exited.
    pub async fn schedule<F: WorkerFeed>(
        &self,
        descriptor: PhaseDescriptor,
        feed: F,
    ) -> PhaseSummary {
        let phase = descriptor.phase();
        info!(
            "Schedule: {} {} tasks ({} I/Os)",
            descriptor.n_tasks(),
            phase,
            descriptor.n_other()
        );

        let context = Arc::new(DispatchContext::new(descriptor, self.invoker.clone()));
        let coordinator = ShutdownCoordinator::new();
        let mut state = PhaseState::Running;

        if context.descriptor.n_tasks() > 0 {
            let consumer = FeedConsumer::new(
                feed,
                context.clone(),
                coordinator.signal(),
                coordinator.tracker(),
            );
            coordinator.spawn(consumer.run());
        }

        context.tracker.wait_all().await;
        state = advance(state);

        state = advance(state);
        coordinator.shutdown().await;

        state = advance(state);
        debug_assert_eq!(state, PhaseState::Terminated);

        let summary = context.summary();
        info!(
            "Schedule: {} phase done ({} attempts, {} failed, {} workers)",
            phase, summary.attempts, summary.failures, summary.workers
        );
        summary
    }
}

fn advance(state: PhaseState) -> PhaseState {
    let next = state.next().unwrap_or(state);
    debug!(from = ?state, to = ?next, "phase state");
    next
}
