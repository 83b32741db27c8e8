//! False position (regula falsi) on a bracketing interval.
//!
//! Each step replaces the midpoint of bisection with the root of the chord
//! through `(a, f(a))` and `(b, f(b))`:
//!
//! ```text
//! c = (a f(b) - b f(a)) / (f(b) - f(a))
//! ```
//!
//! The error is the movement `|c - c_prev|`, with `c_prev` starting at `a`.
//! The run stops when `|f(c)| < tolerance` or the error drops below it.
//!
//! The chord denominator is deliberately unguarded. If `f(b) - f(a)`
//! vanishes, `c` becomes non-finite and the step fails with
//! [`Error::NonFinite`].

use rootscope_core::{Function, Observer};

use crate::{Action, Config, Error, Record, Solution, Status, eval};

/// One false position step.
///
/// `a` and `b` are the endpoints before the step updates them.
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

/// Finds a root inside `bracket` by linear interpolation.
///
/// # Errors
///
/// Returns [`Error::BolzanoViolation`] if `f(a) * f(b) > 0`, or an
/// evaluation error if `f` fails or an iterate or value is non-finite.
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
    let mut fb = eval::value(function, b)?;

    if fa * fb > 0.0 {
        return Err(Error::BolzanoViolation { a, b, fa, fb });
    }

    let tolerance = config.tolerance();
    let mut steps = Vec::new();
    let mut c = a;
    let mut c_prev = a;

    for iter in 1..=config.max_iters() {
        c = (a * fb - b * fa) / (fb - fa);
        let fc = eval::value(function, c)?;
        let error = (c - c_prev).abs();

        let step = Step {
            iter,
            a,
            b,
            c,
            fc,
            error,
        };
        let action = observer.observe(&step);
        steps.push(step);

        if fc.abs() < tolerance || error < tolerance {
            return Ok(Solution::new(Status::Converged, c, steps));
        }
        if let Some(Action::StopEarly) = action {
            return Ok(Solution::new(Status::StoppedByObserver, c, steps));
        }

        if fa * fc < 0.0 {
            b = c;
            fb = fc;
        } else {
            a = c;
            fa = fc;
        }
        c_prev = c;
    }

    Ok(Solution::new(Status::MaxIters, c, steps))
}

/// Runs false position without observation.
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
