//! Root-finding solvers for numerical computation.
//!
//! ## Available Solvers
//!
//! - [`RatioFixedPointSolver`]: Derivative-free fixed-point iteration driven by
//!   the ratio between a target and the current function value
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Absolute tolerance on `|target - f(x)|` (default: 1e-4)
//! - `max_iterations`: Iteration cap (default: 10000)
//!
//! ## Examples
//!
//! ```
//! use optoprice_core::math::solvers::{RatioFixedPointSolver, SolverConfig};
//!
//! // Find x with x² = 4, starting from 1
//! let solver = RatioFixedPointSolver::new(SolverConfig::new(1e-8, 1000).unwrap(), 0.5).unwrap();
//! let outcome = solver
//!     .solve(4.0, 1.0, |x: f64| Ok::<_, std::convert::Infallible>(x * x))
//!     .unwrap();
//!
//! assert!(outcome.converged);
//! assert!((outcome.root - 2.0).abs() < 1e-6);
//! ```

mod config;
mod fixed_point;

// Re-export public types at module level
pub use config::SolverConfig;
pub use fixed_point::{RatioFixedPointSolver, SolverOutcome, Termination};
