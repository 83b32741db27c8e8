//! Bisection on a bracketing interval.
//!
//! Each step evaluates the midpoint `c = (a + b) / 2` and keeps the half of
//! `[a, b]` across which `f` changes sign. The interval width halves every
//! step, so convergence is linear but guaranteed for a continuous `f` with a
//! sign change on the starting bracket.
//!
//! The run stops when `|f(c)| < tolerance` or, before a step, when the width
//! `|b - a|` no longer exceeds the tolerance. Endpoints are used as given;
//! `a > b` is allowed.

use rootscope_core::{Function, Observer};

use crate::{Action, Config, Error, Record, Solution, Status, eval};

/// One bisection step.
///
/// `a` and `b` are the endpoints before the step updates them, and `error`
/// is their distance `|b - a|`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub iter: usize,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub fc: f64,
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
        self.c
    }
}

/// Finds a root inside `bracket` by repeated halving.
///
/// # Errors
///
/// Returns [`Error::BolzanoViolation`] if `f(a) * f(b) > 0`, or an
/// evaluation error if `f` fails or yields a non-finite value.
pub fn solve<F, Obs>(
    function: &F,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<Step>, Error>
where
    F: Function,
    Obs: Observer<Step, Action>,
{
    let [mut a, mut b] = bracket;
    let mut fa = eval::value(function, a)?;
    let fb = eval::value(function, b)?;

    if fa * fb > 0.0 {
        return Err(Error::BolzanoViolation { a, b, fa, fb });
    }

    let tolerance = config.tolerance();
    let mut steps = Vec::new();
    let mut width = (b - a).abs();

    while width > tolerance && steps.len() < config.max_iters() {
        let c = 0.5 * (a + b);
        let fc = eval::value(function, c)?;

        let step = Step {
            iter: steps.len() + 1,
            a,
            b,
            c,
            fc,
            error: width,
        };
        let action = observer.observe(&step);
        steps.push(step);

        if fc.abs() < tolerance {
            return Ok(Solution::new(Status::Converged, c, steps));
        }
        if let Some(Action::StopEarly) = action {
            return Ok(Solution::new(Status::StoppedByObserver, c, steps));
        }

        if fa * fc < 0.0 {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
        width = (b - a).abs();
    }

    let status = if steps.len() < config.max_iters() {
        Status::Converged
    } else {
        Status::MaxIters
    };
    Ok(Solution::new(status, 0.5 * (a + b), steps))
}

/// Runs bisection without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F: Function>(
    function: &F,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<Step>, Error> {
    solve(function, bracket, config, ())
}
