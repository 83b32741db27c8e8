use std::collections::BTreeMap;

use rootscope_core::{Expression, expr::PROBE_X};
use rootscope_observers::LogObserver;
use rootscope_solvers::{Config, bisection, false_position, fixed_point, newton_raphson, secant};
use tracing::{debug, info_span, warn};

use crate::{AnalysisError, AnalysisResult, Method, MethodError, MethodResult, Params, Rejection, Selection};

/// Returns true if `expression` parses and is finite at `x = 1`.
#[must_use]
pub fn is_valid_expression(expression: &str) -> bool {
    rootscope_core::expr::is_valid(expression)
}

/// Runs the selected methods on `expression`.
///
/// Request-level problems are reported once and stop the analysis before
/// any method runs. A method that fails is recorded in the result and does
/// not affect the others.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidExpression`] if the expression does not
/// parse or is not finite at `x = 1`, and [`AnalysisError::InvalidParameter`]
/// if the tolerance or iteration cap is rejected.
pub fn run_analysis(
    expression: &str,
    selection: Selection,
    params: &Params,
) -> Result<AnalysisResult, AnalysisError> {
    let span = info_span!("analysis", expression, %selection);
    let _guard = span.enter();

    let function = parse(expression).inspect_err(|error| warn!(%error, "rejected expression"))?;
    let config = params
        .config()
        .map_err(AnalysisError::from)
        .inspect_err(|error| warn!(%error, "rejected parameters"))?;

    let outcomes: BTreeMap<_, _> = selection
        .methods()
        .iter()
        .map(|&method| (method, run_method(method, &function, params, &config)))
        .collect();

    Ok(AnalysisResult::new(outcomes))
}

fn parse(expression: &str) -> Result<Expression, AnalysisError> {
    let reject = |source| AnalysisError::InvalidExpression {
        expression: expression.to_owned(),
        source,
    };

    let function = Expression::parse(expression).map_err(|error| reject(Rejection::Parse(error)))?;
    let value = function.eval(PROBE_X);
    if !value.is_finite() {
        return Err(reject(Rejection::NotFinite {
            probe: PROBE_X,
            value,
        }));
    }
    Ok(function)
}

fn run_method(
    method: Method,
    function: &Expression,
    params: &Params,
    config: &Config,
) -> Result<MethodResult, MethodError> {
    let observer = LogObserver::new(method.key());

    let outcome = match method {
        Method::Bisection => bisection::solve(function, params.bracket(), config, observer)
            .map(|solution| MethodResult::from_solution(method, solution)),
        Method::FalsePosition => {
            false_position::solve(function, params.bracket(), config, observer)
                .map(|solution| MethodResult::from_solution(method, solution))
        }
        Method::NewtonRaphson => newton_raphson::solve(function, params.x0, config, observer)
            .map(|solution| MethodResult::from_solution(method, solution)),
        Method::Secant => secant::solve(function, params.seeds(), config, observer)
            .map(|solution| MethodResult::from_solution(method, solution)),
        Method::FixedPoint => fixed_point::solve(function, params.x0, config, observer)
            .map(|solution| MethodResult::from_solution(method, solution)),
    };

    match outcome {
        Ok(result) => {
            debug!(
                method = method.key(),
                converged = result.converged,
                iterations = result.iters(),
                root = ?result.root,
                "method finished"
            );
            Ok(result)
        }
        Err(source) => {
            let error = MethodError { method, source };
            warn!(method = method.key(), %error, "method failed");
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use rootscope_core::ExprError;

    use super::*;
    use crate::FailureKind;

    #[test]
    fn validates_expressions_at_probe() {
        assert!(is_valid_expression("x^2 - 4"));
        assert!(is_valid_expression("log(x)"));
        assert!(!is_valid_expression("log(x - 1)"));
        assert!(!is_valid_expression("sqrt(-x)"));
        assert!(!is_valid_expression("2 * y"));
        assert!(!is_valid_expression(""));
    }

    #[test]
    fn deeply_nested_input_is_rejected_not_fatal() {
        let signs = format!("{}x", "-".repeat(10_000));
        assert!(!is_valid_expression(&signs));

        let parens = format!("{}x{}", "(".repeat(20_000), ")".repeat(20_000));
        let error = run_analysis(&parens, Selection::All, &Params::default()).unwrap_err();
        assert!(matches!(
            error,
            AnalysisError::InvalidExpression {
                source: Rejection::Parse(ExprError::TooDeep { .. }),
                ..
            }
        ));
    }

    #[test]
    fn runs_single_method() {
        let params = Params {
            x0: 3.0,
            ..Params::default()
        };

        let result = run_analysis("x^2 - 4", Selection::One(Method::NewtonRaphson), &params).unwrap();

        assert_eq!(result.len(), 1);
        let newton = result.get(Method::NewtonRaphson).unwrap().as_ref().unwrap();
        assert!(newton.converged);
    }

    #[test]
    fn factorial_fails_only_newton() {
        let params = Params {
            a: 1.0,
            b: 3.0,
            x0: 1.5,
            x1: 2.5,
            ..Params::default()
        };

        let result = run_analysis("x! - 2", Selection::All, &params).unwrap();

        let newton = result.get(Method::NewtonRaphson).unwrap().as_ref().unwrap_err();
        assert_eq!(newton.kind(), FailureKind::Evaluation);
        assert!(result.get(Method::Bisection).unwrap().is_ok());
    }
}
