use std::error::Error as StdError;

use thiserror::Error;

/// Errors that abort a solver run.
///
/// Hitting the iteration cap is not an error; see [`Status::MaxIters`].
///
/// [`Status::MaxIters`]: crate::Status::MaxIters
#[derive(Debug, Error)]
pub enum Error {
    /// The bracket endpoints do not straddle a sign change.
    #[error(
        "f(a) and f(b) must have opposite signs: f({a}) = {fa}, f({b}) = {fb}"
    )]
    BolzanoViolation { a: f64, b: f64, fa: f64, fb: f64 },

    /// Newton's step would divide by a near-zero derivative.
    #[error("derivative too small at x = {x} (f'(x) = {derivative:e}), possible division by zero")]
    DerivativeTooSmall { x: f64, derivative: f64 },

    /// The secant through the last two iterates is nearly flat.
    #[error("division by zero: f({x}) = {fx} and f({x_prev}) = {fx_prev} are too close")]
    DivisionByZero {
        x_prev: f64,
        x: f64,
        fx_prev: f64,
        fx: f64,
    },

    /// The fixed-point iterate left the divergence bound.
    #[error("diverged at iteration {iter} (x = {x:e}); try another starting value")]
    Diverged { iter: usize, x: f64 },

    /// An iterate or a function value was NaN or infinite.
    #[error("non-finite value at x = {x}: {value}")]
    NonFinite { x: f64, value: f64 },

    /// The function itself failed to evaluate.
    #[error("function evaluation failed: {0}")]
    Function(Box<dyn StdError + Send + Sync>),
}
