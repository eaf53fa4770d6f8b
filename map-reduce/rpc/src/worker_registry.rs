use async_trait::async_trait;
use map_reduce_core::{WorkerAddress, WorkerFeed};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Every worker that has registered with the master, in registration order
#[derive(Clone)]
pub struct WorkerRegistry {
    workers: Arc<watch::Sender<Vec<WorkerAddress>>>,
}

impl WorkerRegistry {
    pub fn new() -> Self {
        let (workers, _) = watch::channel(Vec::new());
        Self {
            workers: Arc::new(workers),
        }
    }

    /// Returns `false` if the address was already registered
    pub fn register(&self, worker: WorkerAddress) -> bool {
        let added = self.workers.send_if_modified(|workers| {
            if workers.contains(&worker) {
                false
            } else {
                workers.push(worker.clone());
                true
            }
        });

        if added {
            info!(%worker, "worker registered");
        }
        added
    }

    pub fn workers(&self) -> Vec<WorkerAddress> {
        self.workers.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.workers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.borrow().is_empty()
    }

    /// Feed for one phase: replays every worker known so far, then follows
    /// new registrations.
    pub fn subscribe(&self) -> RegistryFeed {
        RegistryFeed {
            workers: self.workers.subscribe(),
            cursor: 0,
        }
    }
}

impl Default for WorkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RegistryFeed {
    workers: watch::Receiver<Vec<WorkerAddress>>,
    cursor: usize,
}

impl RegistryFeed {
    fn take_next(&mut self) -> Option<WorkerAddress> {
        let workers = self.workers.borrow_and_update();
        let next = workers.get(self.cursor).cloned();
        if next.is_some() {
            self.cursor += 1;
        }
        next
    }
}

#[async_trait]
impl WorkerFeed for RegistryFeed {
    async fn next_worker(&mut self) -> Option<WorkerAddress> {
        loop {
            if let Some(worker) = self.take_next() {
                return Some(worker);
            }
            if self.workers.changed().await.is_err() {
                // Registry dropped: hand out whatever was added last, then end.
                return self.take_next();
            }
        }
    }
}
