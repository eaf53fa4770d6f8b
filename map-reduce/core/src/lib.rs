mod job_phase;
pub use job_phase::JobPhase;

mod worker_address;
pub use worker_address::WorkerAddress;

mod task_assignment;
pub use task_assignment::TaskAssignment;

mod phase_descriptor;
pub use phase_descriptor::PhaseDescriptor;

mod task_invoker;
pub use task_invoker::{TaskInvoker, DO_TASK_METHOD};

mod worker_feed;
pub use worker_feed::WorkerFeed;

mod task_attempt_failed;
pub use task_attempt_failed::TaskAttemptFailed;

mod task_pool;
pub use task_pool::TaskPool;

mod completion_tracker;
pub use completion_tracker::CompletionTracker;

mod shutdown_signal;
pub use shutdown_signal::ShutdownSignal;

mod shutdown_coordinator;
pub use shutdown_coordinator::ShutdownCoordinator;

mod phase_state;
pub use phase_state::PhaseState;

mod phase_summary;
pub use phase_summary::PhaseSummary;

mod dispatch_context;
mod dispatch_loop;
mod feed_consumer;

mod scheduler;
pub use scheduler::Scheduler;
