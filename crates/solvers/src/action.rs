/// Control actions an observer can request from any solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop after the current step and return its estimate.
    ///
    /// A step that already satisfies the stopping criterion still reports
    /// [`Status::Converged`](crate::Status::Converged).
    StopEarly,
}
