//! Runs the rootscope methods on a user-supplied expression and compares them.
//!
//! [`run_analysis`] validates a request, runs the [`Selection`] of methods
//! against the parsed expression, and collects every method's outcome into an
//! [`AnalysisResult`]. One method failing never stops the others: failures
//! are stored next to the successes as [`MethodError`]s.
//!
//! ```
//! use rootscope_analysis::{Method, Params, Selection, run_analysis};
//!
//! let params = Params { a: 1.0, b: 2.0, x0: 1.5, x1: 2.0, ..Params::default() };
//! let result = run_analysis("x^3 - x - 2", Selection::All, &params).unwrap();
//!
//! assert!(result.get(Method::Bisection).unwrap().is_ok());
//! assert!(result.best_method().is_some());
//! ```
//!
//! The [`plot`] module turns a result into axis ranges and curve samples.
//!
//! # Features
//!
//! - `serde` — derives `Serialize`/`Deserialize` for [`Params`], iterations,
//!   and method results, and `Serialize` for [`AnalysisResult`].

mod error;
mod method;
mod params;
mod result;
mod run;

pub mod plot;

pub use error::{AnalysisError, FailureKind, MethodError, Rejection};
pub use method::{Method, Selection, UnknownMethod};
pub use params::Params;
pub use result::{AnalysisResult, ComparisonRow, Iteration, MethodResult, SeriesPoint};
pub use run::{is_valid_expression, run_analysis};

pub use rootscope_core::Expression;
pub use rootscope_solvers as solvers;
