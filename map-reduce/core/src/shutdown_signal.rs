use tokio_util::sync::CancellationToken;

/// Read-only view of a phase's one-shot shutdown broadcast.
/// Holders can observe the signal but never fire or reset it.
#[derive(Clone)]
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    pub(crate) fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once shutdown has been broadcast
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}
