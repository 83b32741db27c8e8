//! Core traits and the expression language for single-variable root finding.
//!
//! This crate defines the shared abstractions that solvers, observers, and
//! the analysis layer build on:
//!
//! - [`Function`] — a real function of one real variable that may fail
//! - [`Differentiable`] — a [`Function`] that also provides its first derivative
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`expr`] — a small infix expression language in the free variable `x`,
//!   with symbolic differentiation

mod function;
mod observer;

pub mod expr;

pub use expr::{ExprError, Expression};
pub use function::{Differentiable, FromFn, Function};
pub use observer::Observer;
