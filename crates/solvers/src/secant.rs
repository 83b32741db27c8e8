//! Secant iteration from two starting points.
//!
//! The derivative in Newton's update is replaced by the slope through the
//! last two iterates:
//!
//! ```text
//! x_new = x - f(x) (x - x_prev) / (f(x) - f(x_prev))
//! ```
//!
//! Convergence is superlinear with order equal to the golden ratio.

use rootscope_core::{Function, Observer};

use crate::{Action, Config, Error, Record, Solution, Status, eval};

/// Slope denominators with a smaller magnitude abort the run.
pub const MIN_DENOMINATOR: f64 = 1e-10;

/// One secant step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub iter: usize,
    pub x_prev: f64,
    pub x: f64,
    pub fx: f64,
    pub x_new: f64,
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

/// Finds a root from the seeds `(x0, x1)`.
///
/// The run stops when `|x_new - x| < tolerance` or `|f(x)| < tolerance`.
///
/// # Errors
///
/// Returns [`Error::DivisionByZero`] if `|f(x) - f(x_prev)| < MIN_DENOMINATOR`,
/// or an evaluation error if `f` fails or yields a non-finite value.
pub fn solve<F, Obs>(
    function: &F,
    seeds: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<Step>, Error>
where
    F: Function,
    Obs: Observer<Step, Action>,
{
    let tolerance = config.tolerance();
    let mut steps = Vec::new();
    let [mut x_prev, mut x] = seeds;

    for iter in 1..=config.max_iters() {
        let fx = eval::value(function, x)?;
        let fx_prev = eval::value(function, x_prev)?;

        if (fx - fx_prev).abs() < MIN_DENOMINATOR {
            return Err(Error::DivisionByZero {
                x_prev,
                x,
                fx_prev,
                fx,
            });
        }

        let x_new = x - fx * (x - x_prev) / (fx - fx_prev);
        let error = (x_new - x).abs();

        let step = Step {
            iter,
            x_prev,
            x,
            fx,
            x_new,
            error,
        };
        let action = observer.observe(&step);
        steps.push(step);

        if error < tolerance || fx.abs() < tolerance {
            return Ok(Solution::new(Status::Converged, x_new, steps));
        }
        if let Some(Action::StopEarly) = action {
            return Ok(Solution::new(Status::StoppedByObserver, x_new, steps));
        }

        x_prev = x;
        x = x_new;
    }

    Ok(Solution::new(Status::MaxIters, x, steps))
}

/// Runs the secant method without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F: Function>(
    function: &F,
    seeds: [f64; 2],
    config: &Config,
) -> Result<Solution<Step>, Error> {
    solve(function, seeds, config, ())
}
