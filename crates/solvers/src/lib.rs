//! Classical root-finding methods for a single real variable.
//!
//! Every method drives a [`Function`] toward `f(x) = 0`, recording one
//! [`Record`] per iteration so the full trace can be tabulated or plotted
//! afterwards.
//!
//! # Methods
//!
//! | module              | kind       | start data | convergence          |
//! |---------------------|------------|------------|----------------------|
//! | [`bisection`]       | bracketing | `[a, b]`   | linear               |
//! | [`false_position`]  | bracketing | `[a, b]`   | superlinear          |
//! | [`newton_raphson`]  | open       | `x0`       | quadratic            |
//! | [`secant`]          | open       | `x0, x1`   | superlinear (≈1.618) |
//! | [`fixed_point`]     | open       | `x0`       | linear if `|g'| < 1`  |
//!
//! Each module exposes `solve`, which reports every step to an [`Observer`],
//! and `solve_unobserved`. All methods share [`Config`], [`Solution`],
//! [`Status`], [`Action`], and [`Error`].
//!
//! Reaching the iteration cap is not an error: the solution carries
//! [`Status::MaxIters`] and the last estimate.
//!
//! [`Function`]: rootscope_core::Function
//! [`Observer`]: rootscope_core::Observer

mod action;
mod config;
mod error;
mod eval;
mod record;
mod solution;


pub mod bisection;
pub mod false_position;
pub mod fixed_point;
pub mod newton_raphson;
pub mod secant;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use record::Record;
pub use solution::{Solution, Status};
