use std::collections::BTreeMap;

use rootscope_solvers::{
    Record, Solution, bisection, false_position, fixed_point, newton_raphson, secant,
};

use crate::{Method, MethodError};

/// One recorded iteration, tagged with the method that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "method", rename_all = "camelCase")
)]
pub enum Iteration {
    Bisection(bisection::Step),
    FalsePosition(false_position::Step),
    NewtonRaphson(newton_raphson::Step),
    Secant(secant::Step),
    FixedPoint(fixed_point::Step),
}

impl Iteration {
    /// The method that recorded this iteration.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Iteration::Bisection(_) => Method::Bisection,
            Iteration::FalsePosition(_) => Method::FalsePosition,
            Iteration::NewtonRaphson(_) => Method::NewtonRaphson,
            Iteration::Secant(_) => Method::Secant,
            Iteration::FixedPoint(_) => Method::FixedPoint,
        }
    }

    fn record(&self) -> &dyn Record {
        match self {
            Iteration::Bisection(step) => step,
            Iteration::FalsePosition(step) => step,
            Iteration::NewtonRaphson(step) => step,
            Iteration::Secant(step) => step,
            Iteration::FixedPoint(step) => step,
        }
    }
}

impl Record for Iteration {
    fn iter(&self) -> usize {
        self.record().iter()
    }

    fn error(&self) -> f64 {
        self.record().error()
    }

    fn estimate(&self) -> f64 {
        self.record().estimate()
    }
}

macro_rules! impl_from_step {
    ($($module:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$module::Step> for Iteration {
                fn from(step: $module::Step) -> Self {
                    Iteration::$variant(step)
                }
            }
        )*
    };
}

impl_from_step! {
    bisection => Bisection,
    false_position => FalsePosition,
    newton_raphson => NewtonRaphson,
    secant => Secant,
    fixed_point => FixedPoint,
}

/// The outcome of a method that ran to completion without failing.
///
/// `converged` is false when the iteration cap was reached first; `root`
/// then holds the estimate at the cap.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MethodResult {
    pub method: Method,
    pub root: Option<f64>,
    pub iterations: Vec<Iteration>,
    pub converged: bool,
}

impl MethodResult {
    pub(crate) fn from_solution<S: Into<Iteration>>(method: Method, solution: Solution<S>) -> Self {
        let converged = solution.converged();
        let root = solution.root.is_finite().then_some(solution.root);
        Self {
            method,
            root,
            iterations: solution.steps.into_iter().map(Into::into).collect(),
            converged,
        }
    }

    /// Number of recorded iterations.
    #[must_use]
    pub fn iters(&self) -> usize {
        self.iterations.len()
    }

    /// Error of the first recorded iteration.
    #[must_use]
    pub fn initial_error(&self) -> Option<f64> {
        self.iterations.first().map(Record::error)
    }

    /// Error of the last recorded iteration.
    #[must_use]
    pub fn final_error(&self) -> Option<f64> {
        self.iterations.last().map(Record::error)
    }
}

/// Every method's errors at one iteration index, for error-vs-iteration plots.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SeriesPoint {
    pub iteration: usize,
    pub errors: BTreeMap<Method, f64>,
}

/// Summary of a converged method.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ComparisonRow {
    pub method: Method,
    pub iterations: usize,
    pub initial_error: f64,
    pub final_error: f64,
    /// `initial_error / final_error`, absent when the initial error is zero.
    pub reduction: Option<f64>,
    pub root: Option<f64>,
}

/// Outcomes of one analysis, keyed by method.
///
/// Iteration follows canonical method order regardless of the order the
/// methods ran in.
#[derive(Debug, Default)]
pub struct AnalysisResult {
    outcomes: BTreeMap<Method, Result<MethodResult, MethodError>>,
}

impl AnalysisResult {
    pub(crate) fn new(outcomes: BTreeMap<Method, Result<MethodResult, MethodError>>) -> Self {
        Self { outcomes }
    }

    /// The outcome for `method`, if it was requested.
    #[must_use]
    pub fn get(&self, method: Method) -> Option<&Result<MethodResult, MethodError>> {
        self.outcomes.get(&method)
    }

    /// Every outcome, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Method, &Result<MethodResult, MethodError>)> {
        self.outcomes.iter().map(|(method, outcome)| (*method, outcome))
    }

    /// Number of methods that ran.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Methods that did not fail, converged or not.
    pub fn successes(&self) -> impl Iterator<Item = &MethodResult> {
        self.outcomes.values().filter_map(|outcome| outcome.as_ref().ok())
    }

    /// Methods that failed.
    pub fn failures(&self) -> impl Iterator<Item = &MethodError> {
        self.outcomes.values().filter_map(|outcome| outcome.as_ref().err())
    }

    fn converged(&self) -> impl Iterator<Item = &MethodResult> {
        self.successes().filter(|result| result.converged)
    }

    /// The converged method with the fewest iterations.
    ///
    /// Ties go to the method that comes first in canonical order.
    #[must_use]
    pub fn best_method(&self) -> Option<Method> {
        let mut best: Option<&MethodResult> = None;
        for result in self.converged() {
            if best.is_none_or(|current| result.iters() < current.iters()) {
                best = Some(result);
            }
        }
        best.map(|result| result.method)
    }

    /// One point per iteration index holding the error of every successful
    /// method that recorded that many iterations.
    #[must_use]
    pub fn convergence_series(&self) -> Vec<SeriesPoint> {
        let longest = self.successes().map(MethodResult::iters).max().unwrap_or(0);

        (0..longest)
            .map(|index| SeriesPoint {
                iteration: index + 1,
                errors: self
                    .successes()
                    .filter_map(|result| {
                        let step = result.iterations.get(index)?;
                        Some((result.method, step.error()))
                    })
                    .collect(),
            })
            .collect()
    }

    /// Summary rows for the converged methods.
    #[must_use]
    pub fn comparison(&self) -> Vec<ComparisonRow> {
        self.converged()
            .map(|result| {
                let initial_error = result.initial_error().unwrap_or(0.0);
                let final_error = result.final_error().unwrap_or(0.0);
                ComparisonRow {
                    method: result.method,
                    iterations: result.iters(),
                    initial_error,
                    final_error,
                    reduction: (initial_error > 0.0).then(|| initial_error / final_error),
                    root: result.root,
                }
            })
            .collect()
    }

    /// Roots of the converged methods.
    #[must_use]
    pub fn roots(&self) -> Vec<(Method, f64)> {
        self.converged()
            .filter_map(|result| Some((result.method, result.root?)))
            .collect()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AnalysisResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        #[derive(serde::Serialize)]
        struct Failure {
            method: Method,
            error: String,
            kind: crate::FailureKind,
        }

        #[derive(serde::Serialize)]
        #[serde(untagged)]
        enum Entry<'a> {
            Success(&'a MethodResult),
            Failure(Failure),
        }

        let mut map = serializer.serialize_map(Some(self.outcomes.len()))?;
        for (method, outcome) in &self.outcomes {
            let entry = match outcome {
                Ok(result) => Entry::Success(result),
                Err(error) => Entry::Failure(Failure {
                    method: *method,
                    error: error.to_string(),
                    kind: error.kind(),
                }),
            };
            map.serialize_entry(method.key(), &entry)?;
        }
        map.end()
    }
}
