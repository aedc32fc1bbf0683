/// Actions an observer can take during a fixed-point solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver and return the store as it currently stands.
    ///
    /// Returned from [`Event::Evaluated`](super::Event::Evaluated), this stops
    /// before any update of the current cycle is applied, so a cycle is never
    /// half-applied.
    StopEarly,
}
