use rootscope_solvers::{Config, ConfigError};

/// Numeric inputs of an analysis request.
///
/// Each method reads the subset it needs: `a` and `b` for the bracketing
/// methods, `x0` for Newton-Raphson and Fixed Point, `x0` and `x1` for
/// Secant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Params {
    pub a: f64,
    pub b: f64,
    pub x0: f64,
    pub x1: f64,
    pub tolerance: f64,
    pub max_iterations: i64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            x0: 0.0,
            x1: 0.0,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl Params {
    /// Validates the stopping parameters into a solver config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Tolerance`] unless `tolerance` is finite and
    /// positive, and [`ConfigError::MaxIters`] unless `max_iterations` is
    /// positive.
    pub fn config(&self) -> Result<Config, ConfigError> {
        let max_iters = usize::try_from(self.max_iterations).map_err(|_| ConfigError::MaxIters)?;
        Config::new(self.tolerance, max_iters)
    }

    /// The bracket `[a, b]`.
    #[must_use]
    pub fn bracket(&self) -> [f64; 2] {
        [self.a, self.b]
    }

    /// The secant seeds `[x0, x1]`.
    #[must_use]
    pub fn seeds(&self) -> [f64; 2] {
        [self.x0, self.x1]
    }
}
