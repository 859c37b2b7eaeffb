//! Rayon-based batch evaluation over independent contracts.
//!
//! Contracts share no state, so a batch is a plain parallel map. Results are
//! returned in input order, one `Result` per contract, so a bad contract does
//! not abort the rest of the batch.

use rayon::prelude::*;

use optoprice_core::types::{OptionParameters, PricingError};

use crate::analytical::{valuate, ValuationResult};
use crate::implied_vol::{implied_volatility, ImpliedVolConfig, ImpliedVolatilityResult};

/// Configuration for parallel execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 32,
        }
    }
}

impl ParallelConfig {
    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Maps each item through `mapper`, in parallel above the threshold.
///
/// # Arguments
///
/// * `items` - Slice of items to process
/// * `config` - Threshold below which the map runs on the calling thread
/// * `mapper` - Function to apply to each item
///
/// # Returns
///
/// Vector of mapped results, in input order.
pub fn parallel_map<T, R, F>(items: &[T], config: &ParallelConfig, mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if config.should_parallelize(items.len()) {
        items.par_iter().map(mapper).collect()
    } else {
        items.iter().map(mapper).collect()
    }
}

/// Values every contract in the batch.
///
/// # Examples
/// ```
/// use optoprice_core::types::OptionParameters;
/// use optoprice_models::parallel::value_batch;
///
/// let base = OptionParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .expiry(0.5)
///     .volatility(0.2)
///     .build()
///     .unwrap();
/// let batch: Vec<_> = (80..120).map(|k| base.with_strike(k as f64)).collect();
///
/// let results = value_batch(&batch, false);
/// assert_eq!(results.len(), 40);
/// assert!(results.iter().all(|r| r.is_ok()));
/// ```
pub fn value_batch(
    contracts: &[OptionParameters],
    with_greeks: bool,
) -> Vec<Result<ValuationResult, PricingError>> {
    parallel_map(contracts, &ParallelConfig::default(), |params| {
        valuate(params, with_greeks)
    })
}

/// Solves implied volatility for every contract in the batch.
pub fn implied_volatility_batch(
    contracts: &[OptionParameters],
    config: &ImpliedVolConfig,
) -> Vec<Result<ImpliedVolatilityResult, PricingError>> {
    parallel_map(contracts, &ParallelConfig::default(), |params| {
        implied_volatility(params, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::value;
    use optoprice_core::types::OptionSide;

    fn grid(n: usize) -> Vec<OptionParameters> {
        let base = OptionParameters::builder()
            .spot(100.0)
            .strike(100.0)
            .rate(0.03)
            .expiry(0.25)
            .volatility(0.3)
            .build()
            .unwrap();
        (0..n)
            .map(|i| {
                let side = if i % 2 == 0 {
                    OptionSide::Call
                } else {
                    OptionSide::Put
                };
                base.with_strike(80.0 + i as f64).with_side(side)
            })
            .collect()
    }

    #[test]
    fn test_parallel_map_preserves_order() {
        let items: Vec<usize> = (0..1000).collect();
        let doubled = parallel_map(&items, &ParallelConfig::default(), |x| x * 2);
        assert_eq!(doubled, (0..1000).map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_sequential_below_threshold() {
        let config = ParallelConfig {
            parallel_threshold: 10,
        };
        assert!(!config.should_parallelize(9));
        assert!(config.should_parallelize(10));
        let out = parallel_map(&[1, 2, 3], &config, |x| x + 1);
        assert_eq!(out, vec![2, 3, 4]);
    }

    #[test]
    fn test_value_batch_matches_serial() {
        let contracts = grid(64);
        let results = value_batch(&contracts, true);
        assert_eq!(results.len(), contracts.len());
        for (params, result) in contracts.iter().zip(&results) {
            let result = result.as_ref().unwrap();
            assert_eq!(result.value, value(params).unwrap());
            assert!(result.greeks.is_some());
        }
    }

    #[test]
    fn test_value_batch_isolates_errors() {
        let mut contracts = grid(40);
        contracts[7] = contracts[7].with_expiry(0.0);
        let results = value_batch(&contracts, false);
        assert!(matches!(results[7], Err(PricingError::InvalidDomain { .. })));
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 39);
    }

    #[test]
    fn test_implied_volatility_batch() {
        let contracts: Vec<OptionParameters> = grid(40)
            .into_iter()
            .map(|p| {
                let observed = value(&p).unwrap();
                OptionParameters::builder()
                    .spot(p.spot())
                    .strike(p.strike())
                    .rate(p.rate())
                    .expiry(p.expiry())
                    .observed_value(observed)
                    .side(p.side())
                    .build()
                    .unwrap()
            })
            .collect();

        let results = implied_volatility_batch(&contracts, &ImpliedVolConfig::default());
        assert_eq!(results.len(), 40);
        // Near the money both sides recover σ
        let atm = results[20].as_ref().unwrap();
        assert!(atm.converged);
        assert!((atm.volatility - 0.3).abs() < 1e-3);
    }
}
