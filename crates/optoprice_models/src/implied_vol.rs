//! Implied volatility by damped fixed-point iteration.
//!
//! Starting from an initial guess σ₀, the solver repeats
//!
//! ```text
//! v       = value(params with σ = σₙ)
//! σₙ₊₁    = σₙ + k · (V / v − 1)
//! ```
//!
//! until `|V − v| <= precision` or the iteration cap is hit. The update needs
//! no vega, but it is not globally convergent: far out of the money `v`
//! collapses toward zero and σ runs away. Such cases come back with
//! `converged = false` and the last estimate rather than an error.

use optoprice_core::math::solvers::{RatioFixedPointSolver, SolverConfig, Termination};
use optoprice_core::types::{OptionParameters, PricingError, SolverError};

use crate::analytical::{value_with, PricingOverrides};

/// Settings for [`implied_volatility`].
///
/// # Default Values
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `initial_guess` | 1.0 |
/// | `precision` | 1e-4 |
/// | `step_factor` | 0.1 |
/// | `max_iterations` | 10000 |
///
/// # Examples
///
/// ```rust
/// use optoprice_models::implied_vol::ImpliedVolConfig;
///
/// let config = ImpliedVolConfig::builder()
///     .initial_guess(0.5)
///     .max_iterations(2_000)
///     .build()
///     .unwrap();
/// assert_eq!(config.precision, 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolConfig {
    /// Starting volatility σ₀.
    pub initial_guess: f64,
    /// Absolute tolerance on `|observed − model value|`.
    pub precision: f64,
    /// Damping factor k.
    pub step_factor: f64,
    /// Iteration cap N.
    pub max_iterations: usize,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            initial_guess: 1.0,
            precision: 1e-4,
            step_factor: 0.1,
            max_iterations: 10_000,
        }
    }
}

impl ImpliedVolConfig {
    /// Creates a new builder.
    pub fn builder() -> ImpliedVolConfigBuilder {
        ImpliedVolConfigBuilder::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.initial_guess.is_finite() || self.initial_guess <= 0.0 {
            return Err(SolverError::InvalidConfig {
                message: "initial_guess must be finite and positive".to_string(),
            });
        }
        self.solver().map(|_| ())
    }

    fn solver(&self) -> Result<RatioFixedPointSolver<f64>, SolverError> {
        let config = SolverConfig::new(self.precision, self.max_iterations)?;
        RatioFixedPointSolver::new(config, self.step_factor)
    }
}

/// Builder for [`ImpliedVolConfig`].
#[derive(Debug, Default)]
pub struct ImpliedVolConfigBuilder {
    initial_guess: Option<f64>,
    precision: Option<f64>,
    step_factor: Option<f64>,
    max_iterations: Option<usize>,
}

impl ImpliedVolConfigBuilder {
    /// Sets the starting volatility.
    pub fn initial_guess(mut self, value: f64) -> Self {
        self.initial_guess = Some(value);
        self
    }

    /// Sets the price tolerance.
    pub fn precision(mut self, value: f64) -> Self {
        self.precision = Some(value);
        self
    }

    /// Sets the damping factor.
    pub fn step_factor(mut self, value: f64) -> Self {
        self.step_factor = Some(value);
        self
    }

    /// Sets the iteration cap.
    pub fn max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = Some(value);
        self
    }

    /// Builds the configuration, validating parameters.
    pub fn build(self) -> Result<ImpliedVolConfig, SolverError> {
        let default = ImpliedVolConfig::default();
        let config = ImpliedVolConfig {
            initial_guess: self.initial_guess.unwrap_or(default.initial_guess),
            precision: self.precision.unwrap_or(default.precision),
            step_factor: self.step_factor.unwrap_or(default.step_factor),
            max_iterations: self.max_iterations.unwrap_or(default.max_iterations),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Outcome of an implied-volatility solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolatilityResult {
    /// Solved (or last) volatility estimate
    pub volatility: f64,
    /// Number of updates applied
    pub iterations: usize,
    /// Whether the model value matched the observed value within precision
    pub converged: bool,
}

/// Solves for the volatility that reprices `params.observed_value()`.
///
/// Non-convergence is reported through [`ImpliedVolatilityResult::converged`].
///
/// # Errors
/// - `PricingError::MissingObservedValue` if `params` carries a volatility instead
/// - `PricingError::Construction` if `config` is invalid
/// - `PricingError::InvalidDomain` if the contract cannot be priced at any volatility
///
/// # Examples
/// ```
/// use optoprice_core::types::OptionParameters;
/// use optoprice_models::implied_vol::{implied_volatility, ImpliedVolConfig};
///
/// let params = OptionParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.05)
///     .expiry(30.0 / 365.0)
///     .dividend_yield(0.01)
///     .observed_value(3.018663)
///     .build()
///     .unwrap();
///
/// let result = implied_volatility(&params, &ImpliedVolConfig::default()).unwrap();
/// assert!(result.converged);
/// assert!((result.volatility - 0.25).abs() < 1e-3);
/// ```
pub fn implied_volatility(
    params: &OptionParameters,
    config: &ImpliedVolConfig,
) -> Result<ImpliedVolatilityResult, PricingError> {
    let observed = params
        .observed_value()
        .ok_or(PricingError::MissingObservedValue)?;
    config.validate()?;
    let solver = config.solver()?;

    let outcome = solver.solve(observed, config.initial_guess, |sigma| {
        value_with(params, PricingOverrides::default().volatility(sigma))
    })?;

    if !outcome.converged {
        tracing::warn!(
            side = %params.side(),
            observed,
            volatility = outcome.root,
            iterations = outcome.iterations,
            residual = outcome.residual,
            reason = termination_reason(outcome.termination),
            "implied volatility did not converge"
        );
    }

    Ok(ImpliedVolatilityResult {
        volatility: outcome.root,
        iterations: outcome.iterations,
        converged: outcome.converged,
    })
}

fn termination_reason(termination: Termination) -> &'static str {
    match termination {
        Termination::Converged => "converged",
        Termination::IterationCap => "iteration cap reached",
        Termination::NonPositiveEstimate => "volatility estimate left the positive axis",
        Termination::DegenerateValue => "model value collapsed to zero",
    }
}
