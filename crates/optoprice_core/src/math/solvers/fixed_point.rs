//! Ratio fixed-point solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Why the iteration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// `|target - f(x)|` reached the tolerance.
    Converged,
    /// The iteration cap was hit first.
    IterationCap,
    /// An update drove the estimate to zero or below.
    NonPositiveEstimate,
    /// `f(x)` was zero, negative or non-finite, so the ratio is undefined.
    DegenerateValue,
}

/// Result of a fixed-point solve.
///
/// `root` is always the last estimate at which `f` was evaluated, so it is a
/// usable best effort even when `converged` is false.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOutcome<T: Float> {
    /// Final estimate
    pub root: T,
    /// Number of updates applied
    pub iterations: usize,
    /// Whether the tolerance was met
    pub converged: bool,
    /// `|target - f(root)|`, infinite if `f` never produced a finite value
    pub residual: T,
    /// Stop reason
    pub termination: Termination,
}

/// Fixed-point root finder for positive, increasing functions.
///
/// Solves `f(x) = target` with the update
/// `x_{n+1} = x_n + k · (target / f(x_n) − 1)`,
/// which needs no derivative. It stops as soon as `|target − f(x_n)| <= tolerance`
/// or after `max_iterations` updates. It also stops early, unconverged, when the
/// estimate leaves `x > 0` or when `f(x_n)` is not a positive finite number.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use optoprice_core::math::solvers::{RatioFixedPointSolver, Termination};
///
/// let solver: RatioFixedPointSolver<f64> = RatioFixedPointSolver::with_defaults();
/// let outcome = solver
///     .solve(3.0, 1.0, |x: f64| Ok::<_, ()>(2.0 * x))
///     .unwrap();
///
/// assert_eq!(outcome.termination, Termination::Converged);
/// assert!((outcome.root - 1.5).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct RatioFixedPointSolver<T: Float> {
    config: SolverConfig<T>,
    step_factor: T,
}

impl<T: Float> RatioFixedPointSolver<T> {
    /// Create a solver.
    ///
    /// # Arguments
    ///
    /// * `config` - Tolerance and iteration cap
    /// * `step_factor` - Damping factor `k` applied to each update (must be positive)
    ///
    /// # Errors
    ///
    /// Returns `SolverError::InvalidConfig` for an invalid `config` or step factor.
    pub fn new(config: SolverConfig<T>, step_factor: T) -> Result<Self, SolverError> {
        config.validate()?;
        if !(step_factor > T::zero()) || !step_factor.is_finite() {
            return Err(SolverError::InvalidConfig {
                message: "step_factor must be positive and finite".to_string(),
            });
        }
        Ok(Self {
            config,
            step_factor,
        })
    }

    /// Create a solver with default configuration and a step factor of 0.1.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
            step_factor: T::from(0.1).unwrap_or_else(T::one),
        }
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Damping factor `k`.
    pub fn step_factor(&self) -> T {
        self.step_factor
    }

    /// Find `x` such that `f(x) = target`.
    ///
    /// # Arguments
    ///
    /// * `target` - Value to match
    /// * `x0` - Initial guess
    /// * `f` - Function to invert; its errors are propagated unchanged
    ///
    /// # Returns
    ///
    /// `Ok(SolverOutcome)` whether or not the iteration converged; `Err` only
    /// when `f` itself fails.
    pub fn solve<F, E>(&self, target: T, x0: T, mut f: F) -> Result<SolverOutcome<T>, E>
    where
        F: FnMut(T) -> Result<T, E>,
    {
        let mut x = x0;
        let mut best = SolverOutcome {
            root: x0,
            iterations: 0,
            converged: false,
            residual: T::infinity(),
            termination: Termination::NonPositiveEstimate,
        };

        if !(x > T::zero()) {
            return Ok(best);
        }

        let mut n = 0;
        loop {
            let value = f(x)?;
            let residual = (target - value).abs();
            best.root = x;
            best.iterations = n;
            best.residual = if residual.is_finite() {
                residual
            } else {
                T::infinity()
            };

            if residual <= self.config.tolerance {
                best.converged = true;
                best.termination = Termination::Converged;
                return Ok(best);
            }
            if n >= self.config.max_iterations {
                best.termination = Termination::IterationCap;
                return Ok(best);
            }
            if !value.is_finite() || !(value > T::zero()) {
                best.termination = Termination::DegenerateValue;
                return Ok(best);
            }

            let next = x + self.step_factor * (target / value - T::one());
            if !(next > T::zero()) || !next.is_finite() {
                best.termination = Termination::NonPositiveEstimate;
                return Ok(best);
            }
            x = next;
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::convert::Infallible;

    fn ok(x: f64) -> Result<f64, Infallible> {
        Ok(x)
    }

    #[test]
    fn test_linear_function_converges() {
        let solver: RatioFixedPointSolver<f64> = RatioFixedPointSolver::with_defaults();
        let outcome = solver.solve(5.0, 1.0, |x| ok(x + 1.0)).unwrap();

        assert!(outcome.converged);
        assert_eq!(outcome.termination, Termination::Converged);
        assert!(outcome.residual <= 1e-4);
        assert_abs_diff_eq!(outcome.root, 4.0, epsilon = 1e-3);
    }

    #[test]
    fn test_initial_guess_at_root_needs_no_iterations() {
        let solver: RatioFixedPointSolver<f64> = RatioFixedPointSolver::with_defaults();
        let outcome = solver.solve(2.0, 2.0, ok).unwrap();

        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.root, 2.0);
    }

    #[test]
    fn test_iteration_cap_reported() {
        let config = SolverConfig::new(1e-12, 3).unwrap();
        let solver = RatioFixedPointSolver::new(config, 0.1).unwrap();
        let outcome = solver.solve(100.0, 1.0, ok).unwrap();

        assert!(!outcome.converged);
        assert_eq!(outcome.termination, Termination::IterationCap);
        assert_eq!(outcome.iterations, 3);
        assert!(outcome.root > 1.0);
    }

    #[test]
    fn test_non_positive_initial_guess() {
        let solver: RatioFixedPointSolver<f64> = RatioFixedPointSolver::with_defaults();
        let outcome = solver.solve(1.0, 0.0, ok).unwrap();

        assert!(!outcome.converged);
        assert_eq!(outcome.termination, Termination::NonPositiveEstimate);
        assert_eq!(outcome.iterations, 0);
        assert!(outcome.residual.is_infinite());
    }

    #[test]
    fn test_estimate_driven_negative_stops() {
        // f is far above the target, so one large step overshoots below zero
        let solver = RatioFixedPointSolver::new(SolverConfig::default(), 2.0).unwrap();
        let outcome = solver.solve(0.001, 0.5, |x| ok(x * 1000.0)).unwrap();

        assert!(!outcome.converged);
        assert_eq!(outcome.termination, Termination::NonPositiveEstimate);
        assert_eq!(outcome.root, 0.5);
    }

    #[test]
    fn test_degenerate_value_stops() {
        let solver: RatioFixedPointSolver<f64> = RatioFixedPointSolver::with_defaults();

        let zero = solver.solve(1.0, 1.0, |_| ok(0.0)).unwrap();
        assert_eq!(zero.termination, Termination::DegenerateValue);
        assert!(!zero.converged);

        let nan = solver.solve(1.0, 1.0, |_| ok(f64::NAN)).unwrap();
        assert_eq!(nan.termination, Termination::DegenerateValue);
        assert!(nan.residual.is_infinite());
    }

    #[test]
    fn test_function_error_propagates() {
        let solver: RatioFixedPointSolver<f64> = RatioFixedPointSolver::with_defaults();
        let result = solver.solve(1.0, 1.0, |_| Err::<f64, _>("boom"));
        assert_eq!(result, Err("boom"));
    }

    #[test]
    fn test_invalid_step_factor_rejected() {
        assert!(RatioFixedPointSolver::new(SolverConfig::<f64>::default(), 0.0).is_err());
        assert!(RatioFixedPointSolver::new(SolverConfig::<f64>::default(), -0.1).is_err());
        assert!(RatioFixedPointSolver::new(SolverConfig::<f64>::default(), f64::NAN).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SolverConfig {
            tolerance: 1e-4,
            max_iterations: 0,
        };
        assert!(RatioFixedPointSolver::new(config, 0.1).is_err());
    }

    #[test]
    fn test_accessors() {
        let solver: RatioFixedPointSolver<f64> = RatioFixedPointSolver::with_defaults();
        assert_eq!(solver.step_factor(), 0.1);
        assert_eq!(solver.config().max_iterations, 10_000);
    }
}
