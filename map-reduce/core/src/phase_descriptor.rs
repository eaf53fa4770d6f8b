use crate::{JobPhase, TaskAssignment};

/// Immutable description of one phase invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseDescriptor {
    job_name: String,
    phase: JobPhase,
    n_tasks: usize,
    n_other: usize,
    input_files: Vec<String>,
}

impl PhaseDescriptor {
    /// One map task per input file; each produces `n_reduce` intermediate files.
    pub fn map(job_name: impl Into<String>, input_files: Vec<String>, n_reduce: usize) -> Self {
        Self {
            job_name: job_name.into(),
            phase: JobPhase::Map,
            n_tasks: input_files.len(),
            n_other: n_reduce,
            input_files,
        }
    }

    /// `n_reduce` reduce tasks, each reading one file per map task.
    pub fn reduce(job_name: impl Into<String>, n_map: usize, n_reduce: usize) -> Self {
        Self {
            job_name: job_name.into(),
            phase: JobPhase::Reduce,
            n_tasks: n_reduce,
            n_other: n_map,
            input_files: Vec::new(),
        }
    }

    pub fn phase(&self) -> JobPhase {
        self.phase
    }

    pub fn n_tasks(&self) -> usize {
        self.n_tasks
    }

    pub fn n_other(&self) -> usize {
        self.n_other
    }

    pub fn input_files(&self) -> &[String] {
        &self.input_files
    }

    /// Builds the call arguments for `task_number`.
    ///
    /// Panics if `task_number` is outside `[0, n_tasks)`; the scheduler only
    /// ever hands out indices it enqueued itself.
    pub fn assignment(&self, task_number: usize) -> TaskAssignment {
        assert!(task_number < self.n_tasks, "task index out of range");

        let file = match self.phase {
            JobPhase::Map => Some(self.input_files[task_number].clone()),
            JobPhase::Reduce => None,
        };

        TaskAssignment {
            job_name: self.job_name.clone(),
            phase: self.phase,
            task_number,
            num_other_phase: self.n_other,
            file,
        }
    }
}

