use std::convert::Infallible;

/// A real-valued function of a single real variable.
///
/// Evaluation may fail with [`Function::Error`]. A successful evaluation may
/// still return a non-finite value (for example `sqrt` of a negative number);
/// callers are responsible for checking finiteness.
pub trait Function {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the function at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the function cannot be evaluated.
    fn call(&self, x: f64) -> Result<f64, Self::Error>;
}

/// A [`Function`] that can also evaluate its first derivative.
pub trait Differentiable: Function {
    /// Evaluates the first derivative at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the derivative is unavailable or cannot be evaluated.
    fn derivative(&self, x: f64) -> Result<f64, Self::Error>;
}

impl<F: Function + ?Sized> Function for &F {
    type Error = F::Error;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        (**self).call(x)
    }
}

impl<F: Differentiable + ?Sized> Differentiable for &F {
    fn derivative(&self, x: f64) -> Result<f64, Self::Error> {
        (**self).derivative(x)
    }
}

/// Adapts a plain closure `Fn(f64) -> f64` into an infallible [`Function`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(pub F);

impl<F: Fn(f64) -> f64> Function for FromFn<F> {
    type Error = Infallible;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        Ok((self.0)(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    struct Parabola;

    impl Function for Parabola {
        type Error = Infallible;

        fn call(&self, x: f64) -> Result<f64, Self::Error> {
            Ok(x * x - 4.0)
        }
    }

    impl Differentiable for Parabola {
        fn derivative(&self, x: f64) -> Result<f64, Self::Error> {
            Ok(2.0 * x)
        }
    }

    fn call_through<F: Differentiable>(f: F, x: f64) -> (f64, f64) {
        (f.call(x).unwrap(), f.derivative(x).unwrap())
    }

    #[test]
    fn references_forward_to_the_function() {
        let (fx, dfx) = call_through(&Parabola, 3.0);
        assert_relative_eq!(fx, 5.0);
        assert_relative_eq!(dfx, 6.0);
    }

    #[test]
    fn closures_adapt_into_functions() {
        let f = FromFn(|x: f64| x.cos() - x);
        assert_relative_eq!(f.call(0.0).unwrap(), 1.0);
    }
}
