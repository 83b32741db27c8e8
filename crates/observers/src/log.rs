use rootscope_core::Observer;
use rootscope_solvers::Record;
use tracing::trace;

use crate::traits::HasResidual;

/// Emits a `tracing` event at `TRACE` level for every iteration.
///
/// The observer never steers the run. Events carry the method label along
/// with the step's iteration index, estimate, error, and residual as
/// structured fields, so any installed subscriber can filter or format them.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    method: &'static str,
}

impl LogObserver {
    /// Creates an observer that labels its events with `method`.
    #[must_use]
    pub fn new(method: &'static str) -> Self {
        Self { method }
    }

    /// The label attached to every event.
    #[must_use]
    pub fn method(&self) -> &'static str {
        self.method
    }
}

impl<S, A> Observer<S, A> for LogObserver
where
    S: Record + HasResidual,
{
    fn observe(&mut self, step: &S) -> Option<A> {
        trace!(
            method = self.method,
            iter = step.iter(),
            estimate = step.estimate(),
            error = step.error(),
            residual = step.residual(),
            "iteration"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rootscope_core::FromFn;
    use rootscope_solvers::{Config, Status, bisection, secant};

    use super::*;

    #[test]
    fn does_not_alter_the_run() {
        let f = FromFn(|x: f64| x * x - 2.0);
        let config = Config::default();

        let logged = bisection::solve(&f, [0.0, 2.0], &config, LogObserver::new("bisection"))
            .unwrap();
        let plain = bisection::solve_unobserved(&f, [0.0, 2.0], &config).unwrap();

        assert_eq!(logged.status, Status::Converged);
        assert_relative_eq!(logged.root, plain.root);
        assert_relative_eq!(logged.root, 2f64.sqrt(), epsilon = 1e-6);
        assert_eq!(logged.iters(), plain.iters());
    }

    #[test]
    fn works_for_open_methods() {
        let f = FromFn(|x: f64| x.cos() - x);
        let observer = LogObserver::new("secant");

        let solution = secant::solve(&f, [0.0, 1.0], &Config::default(), observer).unwrap();

        assert!(solution.converged());
        assert_relative_eq!(solution.root, 0.739_085_133, epsilon = 1e-6);
        assert_eq!(observer.method(), "secant");
    }
}
