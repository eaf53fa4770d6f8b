use async_trait::async_trait;
use map_reduce_core::{TaskAssignment, TaskInvoker, WorkerAddress};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How a fake worker answers `Worker.DoTask`
#[derive(Clone, Copy, Debug)]
pub enum Behavior {
    Succeed,
    Fail,
    /// Fails the first call for every task it sees, then succeeds
    FailFirstPerTask,
    /// Fails the given task this many times, succeeds everything else
    FailTaskTimes(usize, usize),
}

#[derive(Clone, Debug)]
pub struct Call {
    pub worker: WorkerAddress,
    pub method: String,
    pub assignment: TaskAssignment,
    pub success: bool,
}

#[derive(Default)]
struct Inner {
    behaviors: HashMap<WorkerAddress, Behavior>,
    seen: HashMap<(WorkerAddress, usize), usize>,
    calls: Vec<Call>,
}

/// In-memory `TaskInvoker` recording every call it receives
#[derive(Clone, Default)]
pub struct ScriptedInvoker {
    inner: Arc<Mutex<Inner>>,
    latency: Duration,
}

impl ScriptedInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn set_behavior(&self, worker: &str, behavior: Behavior) {
        let mut inner = self.inner.lock().unwrap();
        inner.behaviors.insert(WorkerAddress::from(worker), behavior);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    pub fn successes_for(&self, task: usize) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.success && call.assignment.task_number == task)
            .count()
    }

    pub fn attempts_for(&self, task: usize) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.assignment.task_number == task)
            .count()
    }
}

#[async_trait]
impl TaskInvoker for ScriptedInvoker {
    async fn invoke(
        &self,
        worker: &WorkerAddress,
        method: &str,
        assignment: &TaskAssignment,
    ) -> bool {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut inner = self.inner.lock().unwrap();
        let behavior = inner
            .behaviors
            .get(worker)
            .copied()
            .unwrap_or(Behavior::Succeed);
        let seen = inner
            .seen
            .entry((worker.clone(), assignment.task_number))
            .or_insert(0);
        *seen += 1;
        let attempt = *seen;

        let success = match behavior {
            Behavior::Succeed => true,
            Behavior::Fail => false,
            Behavior::FailFirstPerTask => attempt > 1,
            Behavior::FailTaskTimes(task, times) => {
                assignment.task_number != task || attempt > times
            }
        };

        inner.calls.push(Call {
            worker: worker.clone(),
            method: method.to_string(),
            assignment: assignment.clone(),
            success,
        });
        success
    }
}
