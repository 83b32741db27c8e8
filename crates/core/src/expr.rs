//! A small infix expression language in the single free variable `x`.
//!
//! Supported syntax:
//!
//! - operators `+ - * / ^`, unary `-`, postfix `!`, parentheses, and implicit
//!   multiplication (`2x`, `(x + 1)(x - 1)`)
//! - constants `pi`, `e`, `tau`, `phi` (and `PI`, `E`)
//! - functions `sin cos tan asin acos atan sinh cosh tanh exp log log10 log2
//!   sqrt cbrt abs factorial`, with `ln` as an alias of `log` and the
//!   two-argument form `log(value, base)`
//!
//! Parsing rejects malformed input and undefined symbols up front. Evaluation
//! itself never fails: domain errors such as `sqrt(-1)` produce NaN or an
//! infinity, which callers detect with [`f64::is_finite`].
//!
//! The first derivative is computed symbolically. Every supported function has
//! a derivative rule except `factorial`, which is only differentiable when its
//! argument does not depend on `x`.
//!
//! # Example
//!
//! ```
//! use rootscope_core::Expression;
//!
//! let f = Expression::parse("x^2 - 4").unwrap();
//! assert_eq!(f.eval(3.0), 5.0);
//! assert_eq!(f.derivative().unwrap().to_string(), "2 * x");
//! assert_eq!(f.derivative_at(3.0).unwrap(), 6.0);
//! ```

mod builtin;
mod derive;
mod error;
mod lexer;
mod node;
mod parser;

use std::{fmt, str::FromStr, sync::OnceLock};

pub use error::ExprError;

use crate::{Differentiable, Function};

use node::Node;

/// The value of `x` at which an expression is probed for validity.
pub const PROBE_X: f64 = 1.0;

/// A parsed, immutable expression `f(x)`.
#[derive(Debug, Clone)]
pub struct Expression {
    source: String,
    root: Node,
    derivative: OnceLock<Result<Node, ExprError>>,
}

impl Expression {
    /// Parses an expression from its infix source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is empty, malformed, or references a
    /// symbol or function that does not exist.
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let tokens = lexer::tokenize(source)?;
        let root = parser::parse(&tokens)?;
        Ok(Self::from_node(source.to_owned(), root))
    }

    fn from_node(source: String, root: Node) -> Self {
        Self {
            source,
            root,
            derivative: OnceLock::new(),
        }
    }

    /// Returns the source text this expression was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the expression at `x`.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.root.eval(x)
    }

    /// Returns true if the expression evaluates to a finite value at [`PROBE_X`].
    #[must_use]
    pub fn is_finite_at_probe(&self) -> bool {
        self.eval(PROBE_X).is_finite()
    }

    /// Returns the symbolic first derivative as a new expression.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::UnsupportedDerivative`] if the expression applies a
    /// function without a derivative rule to a term that depends on `x`.
    pub fn derivative(&self) -> Result<Expression, ExprError> {
        let node = self.derivative_node()?.clone();
        Ok(Self::from_node(node.to_string(), node))
    }

    /// Evaluates the first derivative at `x`.
    ///
    /// The derivative tree is built on first use and cached.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Expression::derivative`].
    pub fn derivative_at(&self, x: f64) -> Result<f64, ExprError> {
        Ok(self.derivative_node()?.eval(x))
    }

    fn derivative_node(&self) -> Result<&Node, ExprError> {
        self.derivative
            .get_or_init(|| derive::differentiate(&self.root))
            .as_ref()
            .map_err(ExprError::clone)
    }
}

impl FromStr for Expression {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the parsed tree in canonical infix form.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl Function for Expression {
    type Error = ExprError;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        Ok(self.eval(x))
    }
}

impl Differentiable for Expression {
    fn derivative(&self, x: f64) -> Result<f64, Self::Error> {
        self.derivative_at(x)
    }
}

/// Parses `source` and evaluates it at `x`.
///
/// # Errors
///
/// Returns an error if the source fails to parse.
pub fn evaluate(source: &str, x: f64) -> Result<f64, ExprError> {
    Ok(Expression::parse(source)?.eval(x))
}

/// Parses `source` and evaluates its symbolic first derivative at `x`.
///
/// # Errors
///
/// Returns an error if the source fails to parse or cannot be differentiated.
pub fn derivative(source: &str, x: f64) -> Result<f64, ExprError> {
    Expression::parse(source)?.derivative_at(x)
}

/// Returns true if `source` parses and evaluates to a finite value at [`PROBE_X`].
#[must_use]
pub fn is_valid(source: &str) -> bool {
    Expression::parse(source).is_ok_and(|expr| expr.is_finite_at_probe())
}
