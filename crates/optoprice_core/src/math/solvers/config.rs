//! Solver configuration types.

use crate::types::SolverError;
use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use optoprice_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(config.tolerance, 1e-4);
/// assert_eq!(config.max_iterations, 10_000);
///
/// // Invalid settings are rejected
/// assert!(SolverConfig::new(0.0, 100).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance.
    ///
    /// The solver stops when `|target - f(x)| <= tolerance`.
    pub tolerance: T,

    /// Maximum number of updates before giving up.
    ///
    /// Hitting the cap is not an error; the outcome reports `converged = false`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-4
    /// - `max_iterations`: 10000
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-4).unwrap_or_else(T::epsilon),
            max_iterations: 10_000,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Arguments
    ///
    /// * `tolerance` - Convergence tolerance (must be positive and finite)
    /// * `max_iterations` - Maximum iteration count (must be > 0)
    ///
    /// # Errors
    ///
    /// Returns `SolverError::InvalidConfig` if either value is out of range.
    pub fn new(tolerance: T, max_iterations: usize) -> Result<Self, SolverError> {
        let config = Self {
            tolerance,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration, for values assembled field by field.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.tolerance > T::zero()) || !self.tolerance.is_finite() {
            return Err(SolverError::InvalidConfig {
                message: "tolerance must be positive and finite".to_string(),
            });
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                message: "max_iterations must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Tighter tolerance (1e-8) with the same iteration cap.
    pub fn high_precision() -> Self {
        Self {
            tolerance: T::from(1e-8).unwrap_or_else(T::epsilon),
            max_iterations: 10_000,
        }
    }

    /// Relaxed tolerance (1e-3) and a short cap (500) for interactive use.
    pub fn fast() -> Self {
        Self {
            tolerance: T::from(1e-3).unwrap_or_else(T::epsilon),
            max_iterations: 500,
        }
    }
}
