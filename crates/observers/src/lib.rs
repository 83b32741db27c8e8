//! Reusable observers for the rootscope solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across every method in `rootscope-solvers`.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-method observers
//!   ([`HasResidual`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`LogObserver`] — emits one `tracing` event per iteration
//! - [`ResidualStop`] — stops a run once the residual is small enough
//!
//! Observers compose with the pair impl from `rootscope-core`, so
//! `(LogObserver::new("secant"), ResidualStop::new(1e-9))` logs and steers
//! the same run.
//!
//! [`Observer`]: rootscope_core::Observer
//! [`HasResidual`]: traits::HasResidual
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod log;
mod residual_stop;

pub use log::LogObserver;
pub use residual_stop::ResidualStop;
