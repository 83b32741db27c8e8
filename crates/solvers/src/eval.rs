use rootscope_core::{Differentiable, Function};

use crate::Error;

/// Evaluates `f(x)`, rejecting non-finite inputs and outputs.
pub(crate) fn value<F: Function>(function: &F, x: f64) -> Result<f64, Error> {
    let fx = function
        .call(x)
        .map_err(|err| Error::Function(Box::new(err)))?;
    finite(x, fx)
}

/// Evaluates `f'(x)`, rejecting non-finite inputs and outputs.
pub(crate) fn derivative<F: Differentiable>(function: &F, x: f64) -> Result<f64, Error> {
    let dfx = function
        .derivative(x)
        .map_err(|err| Error::Function(Box::new(err)))?;
    finite(x, dfx)
}

fn finite(x: f64, value: f64) -> Result<f64, Error> {
    if x.is_finite() && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFinite { x, value })
    }
}
