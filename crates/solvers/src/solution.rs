/// How a solver run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// A stopping criterion held before the iteration cap.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a solver run: final status, root estimate, and full trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution<S> {
    /// Final solver status.
    pub status: Status,

    /// Root estimate when the solver finished.
    pub root: f64,

    /// One record per iteration, in order.
    pub steps: Vec<S>,
}

impl<S> Solution<S> {
    pub(crate) fn new(status: Status, root: f64, steps: Vec<S>) -> Self {
        Self {
            status,
            root,
            steps,
        }
    }

    /// Returns true if a stopping criterion was met.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }

    /// Number of recorded iterations.
    #[must_use]
    pub fn iters(&self) -> usize {
        self.steps.len()
    }
}
