use rootscope_core::ExprError;
use rootscope_solvers::{ConfigError, Error as SolverError};
use thiserror::Error;

use crate::Method;

/// A request-level failure: no method ran.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("invalid expression `{expression}`: {source}")]
    InvalidExpression {
        expression: String,
        source: Rejection,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ConfigError),
}

/// Why an expression was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Rejection {
    #[error(transparent)]
    Parse(#[from] ExprError),

    #[error("f({probe}) = {value} is not a finite number")]
    NotFinite { probe: f64, value: f64 },
}

/// A failure scoped to one method.
///
/// Displays with the method's name as a prefix, e.g.
/// `Secant: division by zero: ...`.
#[derive(Debug, Error)]
#[error("{}: {source}", .method.name())]
pub struct MethodError {
    pub method: Method,
    pub source: SolverError,
}

/// Coarse classification of a [`MethodError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureKind {
    BolzanoViolation,
    DerivativeTooSmall,
    DivisionByZero,
    Diverged,
    NonFinite,
    Evaluation,
}

impl MethodError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self.source {
            SolverError::BolzanoViolation { .. } => FailureKind::BolzanoViolation,
            SolverError::DerivativeTooSmall { .. } => FailureKind::DerivativeTooSmall,
            SolverError::DivisionByZero { .. } => FailureKind::DivisionByZero,
            SolverError::Diverged { .. } => FailureKind::Diverged,
            SolverError::NonFinite { .. } => FailureKind::NonFinite,
            SolverError::Function(_) => FailureKind::Evaluation,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn method_errors_are_prefixed() {
        let error = MethodError {
            method: Method::FixedPoint,
            source: SolverError::Diverged { iter: 4, x: 2.2e7 },
        };

        let message = error.to_string();
        assert!(message.starts_with("Fixed Point: diverged at iteration 4"));
        assert_eq!(error.kind(), FailureKind::Diverged);
        assert!(error.source().is_some());
    }

    #[test]
    fn evaluation_failures_classify_as_evaluation() {
        let error = MethodError {
            method: Method::NewtonRaphson,
            source: SolverError::Function(Box::new(ExprError::UnsupportedDerivative {
                name: "factorial",
            })),
        };

        assert_eq!(error.kind(), FailureKind::Evaluation);
        assert!(error.to_string().starts_with("Newton-Raphson: "));
    }

    #[test]
    fn expression_rejections_keep_their_cause() {
        let error = AnalysisError::InvalidExpression {
            expression: "sqrt(-x)".into(),
            source: Rejection::NotFinite {
                probe: 1.0,
                value: f64::NAN,
            },
        };

        assert_eq!(
            error.to_string(),
            "invalid expression `sqrt(-x)`: f(1) = NaN is not a finite number"
        );
        assert!(error.source().is_some());
    }
}
