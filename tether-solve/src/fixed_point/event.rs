use std::collections::BTreeSet;

use tether_core::{Evaluation, Store, Value};

/// The outcome of applying one equation's candidate value.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Name of the equation that produced the value.
    pub equation: String,
    /// Name of the variable it targeted.
    pub target: String,
    /// The candidate value, before narrowing against the store.
    pub value: Value,
    /// Whether the target actually narrowed.
    pub changed: bool,
}

/// Events emitted by the fixed-point solver.
pub enum Event<'a> {
    /// A cycle is about to evaluate its viable equations.
    CycleStarted {
        /// Cycle counter, starting at 1.
        cycle: usize,
        /// Names of the viable equations, in the order they will be applied.
        viable: &'a [&'a str],
    },

    /// An equation was evaluated against the pre-cycle store.
    Evaluated {
        cycle: usize,
        equation: &'a str,
        evaluation: &'a Evaluation,
    },

    /// Every update of the cycle has been applied.
    CycleCompleted {
        cycle: usize,
        updates: &'a [Update],
        /// Equations that will not be tried again in this run.
        excluded: &'a BTreeSet<String>,
        store: &'a Store,
    },
}

impl Event<'_> {
    /// Returns the cycle this event belongs to.
    #[must_use]
    pub fn cycle(&self) -> usize {
        match self {
            Self::CycleStarted { cycle, .. }
            | Self::Evaluated { cycle, .. }
            | Self::CycleCompleted { cycle, .. } => *cycle,
        }
    }
}
