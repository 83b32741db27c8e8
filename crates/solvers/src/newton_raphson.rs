//! Newton-Raphson iteration from a single starting point.
//!
//! ```text
//! x_new = x - f(x) / f'(x)
//! ```
//!
//! Convergence is quadratic near a simple root. Nothing detects an iterate
//! leaving the basin of attraction; such runs end at the iteration cap.

use rootscope_core::{Differentiable, Observer};

use crate::{Action, Config, Error, Record, Solution, Status, eval};

/// Derivatives with a smaller magnitude abort the run.
pub const MIN_DERIVATIVE: f64 = 1e-10;

/// One Newton-Raphson step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub iter: usize,
    pub x: f64,
    pub fx: f64,
    pub fpx: f64,
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

/// Finds a root starting from `x0` using the function's derivative.
///
/// The run stops when `|x_new - x| < tolerance` or `|f(x)| < tolerance`.
///
/// # Errors
///
/// Returns [`Error::DerivativeTooSmall`] if `|f'(x)| < MIN_DERIVATIVE`, or an
/// evaluation error if `f` or `f'` fails or yields a non-finite value.
pub fn solve<F, Obs>(
    function: &F,
    x0: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<Step>, Error>
where
    F: Differentiable,
    Obs: Observer<Step, Action>,
{
    let tolerance = config.tolerance();
    let mut steps = Vec::new();
    let mut x = x0;

    for iter in 1..=config.max_iters() {
        let fx = eval::value(function, x)?;
        let fpx = eval::derivative(function, x)?;

        if fpx.abs() < MIN_DERIVATIVE {
            return Err(Error::DerivativeTooSmall { x, derivative: fpx });
        }

        let x_new = x - fx / fpx;
        let error = (x_new - x).abs();

        let step = Step {
            iter,
            x,
            fx,
            fpx,
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

        x = x_new;
    }

    Ok(Solution::new(Status::MaxIters, x, steps))
}

/// Runs Newton-Raphson without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F: Differentiable>(
    function: &F,
    x0: f64,
    config: &Config,
) -> Result<Solution<Step>, Error> {
    solve(function, x0, config, ())
}
