//! Fixed-point iteration on the naive transform `g(x) = x + f(x)`.
//!
//! A root of `f` is a fixed point of `g`. The transform is fixed, not
//! user-supplied, so the iteration only converges where `|1 + f'(x)| < 1`
//! near the root. Divergence is an expected outcome and is reported as
//! [`Error::Diverged`] once an iterate leaves [`DIVERGENCE_BOUND`].

use rootscope_core::{Function, Observer};

use crate::{Action, Config, Error, Record, Solution, Status, eval};

/// Iterates with a larger magnitude are treated as divergent.
pub const DIVERGENCE_BOUND: f64 = 1e6;

/// One fixed-point step.
///
/// `fx` is `f` evaluated at the new iterate `x_new = g(x)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub iter: usize,
    pub x: f64,
    pub x_new: f64,
    pub fx: f64,
    pub error: f64,
}

impl Record for Step {
    fn iter(&self) -> usize {
        self.iter
    }

    fn error(&self) -> f64 {
        self.error
    }

    fn estimate(&self) -> f64 {
        self.x_new
    }
}

/// Iterates `x ← x + f(x)` from `x0`.
///
/// The run stops when `|x_new - x| < tolerance`. The divergence bound is
/// checked after the convergence test of each step.
///
/// # Errors
///
/// Returns [`Error::Diverged`] if an iterate is non-finite or exceeds
/// [`DIVERGENCE_BOUND`] in magnitude, or an evaluation error if `f` fails or
/// yields a non-finite value at a bounded iterate.
pub fn solve<F, Obs>(
    function: &F,
    x0: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<Step>, Error>
where
    F: Function,
    Obs: Observer<Step, Action>,
{
    let tolerance = config.tolerance();
    let mut steps = Vec::new();
    let mut x = x0;

    for iter in 1..=config.max_iters() {
        let x_new = x + eval::value(function, x)?;
        let error = (x_new - x).abs();

        let fx = match eval::value(function, x_new) {
            Ok(fx) => fx,
            Err(Error::NonFinite { .. }) if is_divergent(x_new) => {
                return Err(Error::Diverged { iter, x: x_new });
            }
            Err(err) => return Err(err),
        };

        let step = Step {
            iter,
            x,
            x_new,
            fx,
            error,
        };
        let action = observer.observe(&step);
        steps.push(step);

        if error < tolerance {
            return Ok(Solution::new(Status::Converged, x_new, steps));
        }
        if is_divergent(x_new) {
            return Err(Error::Diverged { iter, x: x_new });
        }
        if let Some(Action::StopEarly) = action {
            return Ok(Solution::new(Status::StoppedByObserver, x_new, steps));
        }

        x = x_new;
    }

    Ok(Solution::new(Status::MaxIters, x, steps))
}

/// Runs fixed-point iteration without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F: Function>(
    function: &F,
    x0: f64,
    config: &Config,
) -> Result<Solution<Step>, Error> {
    solve(function, x0, config, ())
}

fn is_divergent(x: f64) -> bool {
    !x.is_finite() || x.abs() > DIVERGENCE_BOUND
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use rootscope_core::FromFn;

    #[test]
    fn converges_when_g_contracts() {
        // g(x) = cos(x), a contraction near the Dottie number.
        let solution = solve_unobserved(
            &FromFn(|x: f64| x.cos() - x),
            0.5,
            &Config::default(),
        )
        .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.root, 0.739_085_133_215_160_6, epsilon = 1e-5);
    }

    #[test]
    fn parabola_diverges_from_three() {
        // 3 → 8 → 68 → 4688 → 21982028
        let result = solve_unobserved(&FromFn(|x: f64| x * x - 4.0), 3.0, &Config::default());

        assert!(matches!(
            result,
            Err(Error::Diverged { iter: 4, x }) if x > DIVERGENCE_BOUND
        ));
    }

    #[test]
    fn overflow_counts_as_divergence() {
        let result = solve_unobserved(&FromFn(|x: f64| x.exp()), 700.0, &Config::default());
        assert!(matches!(result, Err(Error::Diverged { iter: 1, .. })));
    }

    #[test]
    fn records_transform_and_movement() {
        let config = Config::new(1e-6, 2).unwrap();
        let solution = solve_unobserved(&FromFn(|x: f64| 0.5 - 0.5 * x), 0.0, &config)
            .expect("should run");

        // g(x) = 0.5 + 0.5 x: 0 → 0.5 → 0.75
        let first = solution.steps[0];
        assert_relative_eq!(first.x_new, 0.5);
        assert_relative_eq!(first.fx, 0.25);
        assert_relative_eq!(first.error, 0.5);
        assert_eq!(solution.status, Status::MaxIters);
        assert_relative_eq!(solution.root, 0.75);
    }
}
