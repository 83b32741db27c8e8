//! Capability traits for cross-method observers.
//!
//! These traits abstract over method-specific step and action types, enabling
//! observers to work generically across the solvers.
//!
//! # Step traits
//!
//! - [`HasResidual`] — steps that carry the function value at the estimate
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use rootscope_core::Observer;
//! use rootscope_observers::traits::{CanStopEarly, HasResidual};
//!
//! struct Patience {
//!     tolerance: f64,
//!     min_iters: usize,
//!     iter: usize,
//! }
//!
//! impl<S: HasResidual, A: CanStopEarly> Observer<S, A> for Patience {
//!     fn observe(&mut self, step: &S) -> Option<A> {
//!         self.iter += 1;
//!         if self.iter >= self.min_iters && step.residual().abs() < self.tolerance {
//!             return Some(A::stop_early());
//!         }
//!         None
//!     }
//! }
//! ```

use rootscope_solvers::{
    Action, bisection, false_position, fixed_point, newton_raphson, secant,
};

/// A step that carries a residual value.
pub trait HasResidual {
    /// Returns the function value this step recorded.
    ///
    /// Bracketing and fixed-point steps record `f` at the new estimate;
    /// Newton-Raphson and Secant record it at the iterate they stepped from.
    fn residual(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl HasResidual for bisection::Step {
    fn residual(&self) -> f64 {
        self.fc
    }
}

impl HasResidual for false_position::Step {
    fn residual(&self) -> f64 {
        self.fc
    }
}

impl HasResidual for newton_raphson::Step {
    fn residual(&self) -> f64 {
        self.fx
    }
}

impl HasResidual for secant::Step {
    fn residual(&self) -> f64 {
        self.fx
    }
}

impl HasResidual for fixed_point::Step {
    fn residual(&self) -> f64 {
        self.fx
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
