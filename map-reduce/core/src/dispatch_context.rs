use crate::{CompletionTracker, PhaseDescriptor, PhaseSummary, TaskInvoker, TaskPool};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// State shared by the feed consumer and every dispatch loop of a phase
pub(crate) struct DispatchContext<I> {
    pub(crate) descriptor: PhaseDescriptor,
    pub(crate) pool: TaskPool,
    pub(crate) tracker: CompletionTracker,
    pub(crate) invoker: Arc<I>,
    workers: AtomicUsize,
    attempts: AtomicUsize,
    failures: AtomicUsize,
}

impl<I: TaskInvoker> DispatchContext<I> {
    pub(crate) fn new(descriptor: PhaseDescriptor, invoker: Arc<I>) -> Self {
        let n_tasks = descriptor.n_tasks();
        Self {
            descriptor,
            pool: TaskPool::filled(n_tasks),
            tracker: CompletionTracker::new(n_tasks),
            invoker,
            workers: AtomicUsize::new(0),
            attempts: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        }
    }

    pub(crate) fn record_worker(&self) {
        self.workers.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn summary(&self) -> PhaseSummary {
        PhaseSummary {
            phase: self.descriptor.phase(),
            n_tasks: self.descriptor.n_tasks(),
            workers: self.workers.load(Ordering::Relaxed),
            attempts: self.attempts.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}
