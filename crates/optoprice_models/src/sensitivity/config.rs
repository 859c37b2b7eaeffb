//! Sweep grid configuration.

use optoprice_core::types::PricingError;

/// Grid for a spot or volatility sweep.
///
/// The grid is `x + i·increment` for `i` in `[−steps_each_side, steps_each_side)`,
/// so it holds `2·steps_each_side` points with the original `x` at index
/// `steps_each_side`.
///
/// # Default Values
///
/// | Preset | `increment` | `steps_each_side` |
/// |--------|-------------|-------------------|
/// | [`SweepConfig::spot`] | 0.1 | 40 |
/// | [`SweepConfig::volatility`] | 0.01 | 40 |
///
/// # Examples
///
/// ```rust
/// use optoprice_models::sensitivity::SweepConfig;
///
/// let config = SweepConfig::builder()
///     .increment(0.5)
///     .steps_each_side(10)
///     .build()
///     .unwrap();
/// assert_eq!(config.points(), 20);
///
/// assert!(SweepConfig::builder().increment(-1.0).build().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    /// Distance between neighbouring grid points.
    pub increment: f64,

    /// Number of points below the original value; one fewer lies above it.
    pub steps_each_side: usize,
}

impl SweepConfig {
    /// Default spot grid: ±40 steps of 0.1.
    pub const fn spot() -> Self {
        Self {
            increment: 0.1,
            steps_each_side: 40,
        }
    }

    /// Default volatility grid: ±40 steps of 0.01.
    pub const fn volatility() -> Self {
        Self {
            increment: 0.01,
            steps_each_side: 40,
        }
    }

    /// Creates a new builder, starting from the spot preset.
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::default()
    }

    /// Number of grid points.
    #[inline]
    pub fn points(&self) -> usize {
        2 * self.steps_each_side
    }

    /// Grid offsets `i·increment`, ascending.
    pub fn offsets(&self) -> impl Iterator<Item = f64> + '_ {
        let n = self.steps_each_side as i64;
        (-n..n).map(move |i| i as f64 * self.increment)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.increment.is_finite() || self.increment <= 0.0 {
            return Err(PricingError::construction(format!(
                "sweep increment must be finite and positive, got {}",
                self.increment
            )));
        }
        Ok(())
    }
}

/// Builder for [`SweepConfig`].
#[derive(Debug, Default)]
pub struct SweepConfigBuilder {
    increment: Option<f64>,
    steps_each_side: Option<usize>,
}

impl SweepConfigBuilder {
    /// Sets the grid spacing.
    pub fn increment(mut self, value: f64) -> Self {
        self.increment = Some(value);
        self
    }

    /// Sets the number of steps below the original value.
    pub fn steps_each_side(mut self, value: usize) -> Self {
        self.steps_each_side = Some(value);
        self
    }

    /// Builds the configuration, validating parameters.
    pub fn build(self) -> Result<SweepConfig, PricingError> {
        let default = SweepConfig::spot();
        let config = SweepConfig {
            increment: self.increment.unwrap_or(default.increment),
            steps_each_side: self.steps_each_side.unwrap_or(default.steps_each_side),
        };
        config.validate()?;
        Ok(config)
    }
}
