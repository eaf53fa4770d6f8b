use crate::JobPhase;

/// Diagnostic counters reported once a phase has terminated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSummary {
    pub phase: JobPhase,
    pub n_tasks: usize,
    /// Distinct workers that were given a dispatch loop
    pub workers: usize,
    pub attempts: usize,
    pub failures: usize,
}
