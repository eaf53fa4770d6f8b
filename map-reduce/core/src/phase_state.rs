/// Lifecycle of one phase invocation. States are only ever visited in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseState {
    /// Tasks pending or in flight
    Running,
    /// Every task has been marked done
    AllDone,
    /// Shutdown broadcast, waiting for loops to exit
    ShuttingDown,
    /// All concurrent units gone, the phase call returns
    Terminated,
}

impl PhaseState {
    pub fn next(self) -> Option<PhaseState> {
        match self {
            PhaseState::Running => Some(PhaseState::AllDone),
            PhaseState::AllDone => Some(PhaseState::ShuttingDown),
            PhaseState::ShuttingDown => Some(PhaseState::Terminated),
            PhaseState::Terminated => None,
        }
    }
}
