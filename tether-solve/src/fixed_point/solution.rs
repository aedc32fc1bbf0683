use std::collections::BTreeSet;

/// Why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No equation was viable at the start of the final cycle.
    ConvergedEmpty,

    /// The final cycle ran but changed nothing.
    ConvergedStable,

    /// The cycle cap was reached while equations were still making progress.
    CapReached,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a fixed-point solve.
///
/// The solved values live in the store passed to the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// Number of cycles entered, including the one that stopped the run.
    pub cycles: usize,

    /// Total number of updates that narrowed a variable.
    pub changes: usize,

    /// Equations that stopped producing changes.
    pub excluded: BTreeSet<String>,
}
