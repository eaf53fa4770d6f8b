use tokio::sync::watch;

struct Progress {
    done: Vec<bool>,
    completed: usize,
}

/// Counting barrier released once every task of the phase is done.
///
/// Dispatch loops are spawned as workers register, so the barrier is sized by
/// task count rather than by the number of concurrent units.
pub struct CompletionTracker {
    target: usize,
    progress: watch::Sender<Progress>,
}

impl CompletionTracker {
    pub fn new(n_tasks: usize) -> Self {
        let (progress, _) = watch::channel(Progress {
            done: vec![false; n_tasks],
            completed: 0,
        });
        Self {
            target: n_tasks,
            progress,
        }
    }

    /// Marks `index` done. Returns `false` if it was already done or out of
    /// range, in which case the count is left untouched.
    pub fn mark_done(&self, index: usize) -> bool {
        self.progress.send_if_modified(|progress| match progress.done.get_mut(index) {
            Some(done) if !*done => {
                *done = true;
                progress.completed += 1;
                true
            }
            _ => false,
        })
    }

    pub fn is_done(&self, index: usize) -> bool {
        self.progress
            .borrow()
            .done
            .get(index)
            .copied()
            .unwrap_or(false)
    }

    pub fn completed(&self) -> usize {
        self.progress.borrow().completed
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Resolves as soon as all tasks are done, immediately when there are none.
    pub async fn wait_all(&self) {
        let target = self.target;
        let mut progress = self.progress.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = progress
            .wait_for(|progress| progress.completed >= target)
            .await;
    }
}
