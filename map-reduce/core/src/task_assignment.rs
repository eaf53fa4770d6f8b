use crate::JobPhase;
use serde::{Deserialize, Serialize};

/// Arguments of a single `Worker.DoTask` call.
/// Built fresh for every dispatch attempt and never mutated after send.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskAssignment {
    pub job_name: String,
    pub phase: JobPhase,
    pub task_number: usize,
    /// Reduce task count for a map task, map input count for a reduce task
    pub num_other_phase: usize,
    /// Input file, only present for map tasks
    pub file: Option<String>,
}
