use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::warn;

/// Shared multi-producer multi-consumer queue of task indices waiting for
/// (re)assignment. No ordering is promised between pending indices.
///
/// Consumers queue up on the receiver lock in arrival order, so an index put
/// back by one loop goes to a loop that was already waiting, not to whoever
/// asks next.
pub struct TaskPool {
    sender: mpsc::Sender<usize>,
    receiver: Arc<Mutex<mpsc::Receiver<usize>>>,
    capacity: usize,
}

impl TaskPool {
    /// Empty pool that can hold up to `capacity` indices
    pub fn new(capacity: usize) -> Self {
        // tokio channels need room for at least one message
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
            capacity,
        }
    }

    /// Pool already holding every index in `[0, n_tasks)`
    pub fn filled(n_tasks: usize) -> Self {
        let pool = Self::new(n_tasks);
        for index in 0..n_tasks {
            if pool.sender.try_send(index).is_err() {
                warn!(index, "task pool rejected an initial index");
            }
        }
        pool
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Never waits for room: a task index is live in at most one place, so
    /// the pool can never hold more than `capacity` of them.
    pub async fn enqueue(&self, index: usize) {
        debug_assert!(self.len() < self.capacity, "task pool over capacity");
        // The receiver lives inside the pool, so the channel cannot be closed here.
        if self.sender.send(index).await.is_err() {
            warn!(index, "task pool closed, index dropped");
        }
    }

    /// Waits until an index is available and claims it. `None` only if the
    /// channel closed, which cannot happen while the pool is alive.
    ///
    /// Cancel safe: both the lock and the channel receive are.
    pub async fn dequeue(&self) -> Option<usize> {
        let mut receiver = self.receiver.lock().await;
        receiver.recv().await
    }

    pub fn len(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
