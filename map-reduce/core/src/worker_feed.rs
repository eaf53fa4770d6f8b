use crate::WorkerAddress;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Stream of worker addresses as they register.
///
/// Implementations must be cancel safe: the scheduler races `next_worker`
/// against its shutdown signal and drops the pending call when shutdown wins.
#[async_trait]
pub trait WorkerFeed: Send + 'static {
    /// Next registered worker, or `None` once the feed can never yield again
    async fn next_worker(&mut self) -> Option<WorkerAddress>;
}

#[async_trait]
impl WorkerFeed for mpsc::Receiver<WorkerAddress> {
    async fn next_worker(&mut self) -> Option<WorkerAddress> {
        self.recv().await
    }
}

#[async_trait]
impl WorkerFeed for mpsc::UnboundedReceiver<WorkerAddress> {
    async fn next_worker(&mut self) -> Option<WorkerAddress> {
        self.recv().await
    }
}
