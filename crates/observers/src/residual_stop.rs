use rootscope_core::Observer;

use crate::traits::{CanStopEarly, HasResidual};

/// Stops a run as soon as `|residual|` drops below a threshold.
///
/// Useful when a looser acceptance test than the solver's own is enough,
/// for example a quick preview before a full-precision run.
#[derive(Debug, Clone, Copy)]
pub struct ResidualStop {
    threshold: f64,
    min_iters: usize,
    seen: usize,
}

impl ResidualStop {
    /// Creates an observer that stops once `|residual| < threshold`.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            min_iters: 1,
            seen: 0,
        }
    }

    /// Never stops before `min_iters` steps have been observed.
    #[must_use]
    pub fn min_iters(mut self, min_iters: usize) -> Self {
        self.min_iters = min_iters;
        self
    }

    /// Number of steps observed so far.
    #[must_use]
    pub fn seen(&self) -> usize {
        self.seen
    }
}

impl<S: HasResidual, A: CanStopEarly> Observer<S, A> for ResidualStop {
    fn observe(&mut self, step: &S) -> Option<A> {
        self.seen += 1;
        if self.seen >= self.min_iters && step.residual().abs() < self.threshold {
            return Some(A::stop_early());
        }
        None
    }
}

impl<S: HasResidual, A: CanStopEarly> Observer<S, A> for &mut ResidualStop {
    fn observe(&mut self, step: &S) -> Option<A> {
        (**self).observe(step)
    }
}
