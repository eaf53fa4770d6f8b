use crate::{JobPhase, WorkerAddress};
use thiserror::Error;

/// The only failure the scheduler knows about: a call that did not report success.
/// A crashed worker and a failing task are indistinguishable here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("worker {worker} {phase} task #{task} - failed")]
pub struct TaskAttemptFailed {
    pub worker: WorkerAddress,
    pub phase: JobPhase,
    pub task: usize,
}
